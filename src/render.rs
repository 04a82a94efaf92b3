//! Rendering of [`View`]s as terminal text or as HTML fragments.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text_node};

use crate::browser::{Card, View};
use crate::model::RecipeDetail;

fn favorite_label(favorite: bool) -> &'static str {
    if favorite {
        "Saved"
    } else {
        "Save Recipe"
    }
}

/// Plain text for the terminal
pub fn text(view: &View) -> String {
    match view {
        View::Cards {
            heading,
            cards,
            empty_message,
        } => {
            let mut lines = vec![heading.clone(), "=".repeat(heading.chars().count())];
            if cards.is_empty() {
                lines.push(empty_message.clone());
            }
            for card in cards {
                let marker = if card.favorite { "♥" } else { " " };
                lines.push(format!(
                    "{} [{}] {} ({})",
                    marker, card.recipe.id, card.recipe.title, card.recipe.category
                ));
            }
            to_block(lines)
        }
        View::Detail { recipe, favorite } => detail_text(recipe, *favorite),
        View::FavoriteToggled { id, favorite } => {
            let status = if *favorite {
                "saved to"
            } else {
                "removed from"
            };
            format!("Recipe {} {} favorites\n", id, status)
        }
        View::Notice(message) | View::Failure(message) => format!("{}\n", message),
    }
}

fn to_block(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

fn detail_text(recipe: &RecipeDetail, favorite: bool) -> String {
    let summary = &recipe.summary;
    let mut meta = vec![summary.category.clone()];
    meta.extend(recipe.area.iter().cloned());
    meta.extend(recipe.tags.iter().cloned());

    let mut lines = vec![
        format!("{} [{}]", summary.title, favorite_label(favorite)),
        meta.join(" · "),
    ];
    lines.extend(recipe.video_url.iter().map(|video| format!("Video: {}", video)));
    lines.extend(recipe.source_url.iter().map(|source| format!("Source: {}", source)));

    lines.push("\nIngredients".to_string());
    lines.extend(recipe.ingredients.iter().map(|i| format!("  - {}", i)));

    lines.push("\nInstructions".to_string());
    lines.extend(
        recipe
            .instructions
            .iter()
            .enumerate()
            .map(|(index, step)| format!("  {}. {}", index + 1, step)),
    );
    to_block(lines)
}

/// HTML fragment matching the card grid and detail markup of the web page
pub fn html(view: &View) -> String {
    match view {
        View::Cards {
            heading,
            cards,
            empty_message,
        } => {
            let mut out = format!("<h2 id=\"recipes-heading\">{}</h2>\n", text_node(heading));
            if cards.is_empty() {
                out.push_str(&format!("<p>{}</p>\n", text_node(empty_message)));
            } else {
                out.push_str("<div id=\"recipes-grid\">\n");
                for card in cards {
                    out.push_str(&card_html(card));
                }
                out.push_str("</div>\n");
            }
            out
        }
        View::Detail { recipe, favorite } => detail_html(recipe, *favorite),
        View::FavoriteToggled { id, favorite } => favorite_button_html(id, *favorite),
        View::Notice(message) | View::Failure(message) => {
            format!("<p>{}</p>\n", text_node(message))
        }
    }
}

fn card_html(card: &Card) -> String {
    let recipe = &card.recipe;
    let class = if card.favorite {
        "recipe-card favorite"
    } else {
        "recipe-card"
    };
    format!(
        r#"<div class="{class}" data-id="{id}">
    <div class="recipe-image-container">
        <img src="{thumb}" alt="{alt}" class="recipe-image">
    </div>
    <div class="recipe-info">
        <h3 class="recipe-title">{title}</h3>
        <span class="recipe-category">{category}</span>
    </div>
</div>
"#,
        class = class,
        id = attr(&recipe.id),
        thumb = attr(&recipe.thumbnail_url),
        alt = attr(&recipe.title),
        title = text_node(&recipe.title),
        category = text_node(&recipe.category),
    )
}

fn favorite_button_html(id: &str, favorite: bool) -> String {
    let icon = if favorite { "fas fa-heart" } else { "far fa-heart" };
    format!(
        concat!(
            "<button class=\"action-button favorite-button\" id=\"favorite-button\" data-id=\"{}\">",
            "<i class=\"{}\"></i> {}</button>\n"
        ),
        attr(id),
        icon,
        favorite_label(favorite)
    )
}

fn detail_html(recipe: &RecipeDetail, favorite: bool) -> String {
    let summary = &recipe.summary;
    let mut tags = format!(
        "<div class=\"recipe-tag\"><i class=\"fas fa-utensils\"></i> {}</div>",
        text_node(&summary.category)
    );
    if let Some(area) = &recipe.area {
        tags.push_str(&format!(
            "<div class=\"recipe-tag\"><i class=\"fas fa-globe\"></i> {}</div>",
            text_node(area)
        ));
    }
    for tag in &recipe.tags {
        tags.push_str(&format!(
            "<div class=\"recipe-tag\"><i class=\"fas fa-tag\"></i> {}</div>",
            text_node(tag)
        ));
    }

    let mut actions = favorite_button_html(&summary.id, favorite);
    if let Some(video) = &recipe.video_url {
        actions.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\" class=\"action-button\"><i class=\"fab fa-youtube\"></i> Watch Video</a>\n",
            attr(video)
        ));
    }
    if let Some(source) = &recipe.source_url {
        actions.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\" class=\"action-button\"><i class=\"fas fa-external-link-alt\"></i> Source</a>\n",
            attr(source)
        ));
    }

    let ingredients: String = recipe
        .ingredients
        .iter()
        .map(|i| format!("<li>{}</li>", text_node(i)))
        .collect();
    let instructions: String = recipe
        .instructions
        .iter()
        .enumerate()
        .map(|(index, step)| {
            format!("<p><strong>{}.</strong> {}</p>", index + 1, text_node(step))
        })
        .collect();

    format!(
        r#"<div class="recipe-details-header">
    <img src="{thumb}" alt="{alt}" class="recipe-details-image">
    <div class="recipe-details-info">
        <h3 class="recipe-details-title">{title}</h3>
        <div class="recipe-meta">{tags}</div>
        <div class="recipe-actions">
{actions}        </div>
    </div>
</div>
<div class="recipe-content">
    <div class="recipe-ingredients">
        <h3>Ingredients</h3>
        <ul>{ingredients}</ul>
    </div>
    <div class="recipe-instructions">
        <h3>Instructions</h3>
        {instructions}
    </div>
</div>
"#,
        thumb = attr(&summary.thumbnail_url),
        alt = attr(&summary.title),
        title = text_node(&summary.title),
        tags = tags,
        actions = actions,
        ingredients = ingredients,
        instructions = instructions,
    )
}
