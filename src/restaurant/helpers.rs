//! Restaurant Business Logic Helpers
//!
//! Slug rules, the restaurant resolver and the landing page rendering.

use tracing::debug;

use super::models::{ConsumptionMethod, ConsumptionMethodOption, Restaurant};
use crate::error::AppError;
use crate::store::EntityStore;
use crate::view::{escape, layout, ImageHostAllowList};

/// Path segments owned by the router; a restaurant may not use them as slug.
pub const RESERVED_SLUGS: [&str; 3] = ["api", "assets", "healthz"];

/// Longest accepted slug
pub const MAX_SLUG_LEN: usize = 64;

/// Checks that `slug` is a canonical URL-safe identifier.
///
/// Accepted: lowercase ASCII letters, digits and inner `-`, at most
/// [`MAX_SLUG_LEN`] characters, not a reserved route segment.
pub fn validate_slug(slug: &str) -> Result<(), &'static str> {
    if slug.is_empty() {
        return Err("is empty");
    }
    if slug.len() > MAX_SLUG_LEN {
        return Err("is too long");
    }
    if !slug
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
    {
        return Err("may only contain lowercase letters, digits and '-'");
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        return Err("may not start or end with '-'");
    }
    if RESERVED_SLUGS.contains(&slug) {
        return Err("is reserved");
    }
    Ok(())
}

/// Resolves the restaurant addressed by `slug`.
///
/// The slug is used verbatim: no trimming and no case folding. A miss is
/// reported as [`AppError::NotFound`], which renders the 404 page.
pub async fn resolve_restaurant(
    store: &dyn EntityStore,
    slug: &str,
) -> Result<Restaurant, AppError> {
    match store.find_restaurant_by_slug(slug).await? {
        Some(restaurant) => Ok(restaurant),
        None => {
            debug!(slug, "Restaurant not found");
            Err(AppError::NotFound(format!("restaurant {slug:?}")))
        }
    }
}

/// The two options of the consumption method selector, scoped to `slug`.
pub fn consumption_method_options(slug: &str) -> [ConsumptionMethodOption<'_>; 2] {
    ConsumptionMethod::ALL.map(|option| ConsumptionMethodOption {
        slug,
        option,
        button_text: option.label(),
        image_alt: option.label(),
        image_url: option.image_path(),
    })
}

pub fn render_consumption_method_option(option: &ConsumptionMethodOption<'_>) -> String {
    format!(
        concat!(
            r#"<a class="consumption-method" href="{href}" data-option="{option}">"#,
            r#"<img src="{image}" alt="{alt}">"#,
            r#"<span class="button">{label}</span>"#,
            "</a>"
        ),
        href = escape(&option.href()),
        option = option.option,
        image = escape(option.image_url),
        alt = escape(option.image_alt),
        label = escape(option.button_text),
    )
}

/// Renders the landing page: logo, name, welcome text and the selector.
pub fn render_restaurant_page(restaurant: &Restaurant, images: &ImageHostAllowList) -> String {
    let options: String = consumption_method_options(&restaurant.slug)
        .iter()
        .map(render_consumption_method_option)
        .collect();

    let body = format!(
        concat!(
            r#"<div class="restaurant-page">"#,
            r#"<div class="restaurant-identity">{avatar}<h2>{name}</h2></div>"#,
            r#"<div class="welcome">"#,
            "<h3>Seja bem-vindo!</h3>",
            "<p>Selecione a forma de entrega dos seus utensílios. Cuidamos de cada ",
            "detalhe para tornar sua festa especial.</p>",
            "</div>",
            r#"<div class="consumption-methods">{options}</div>"#,
            "</div>"
        ),
        avatar = images.img(
            &restaurant.avatar_image_url,
            "Imagem do restaurante",
            "restaurant-avatar"
        ),
        name = escape(&restaurant.name),
        options = options,
    );

    layout(&restaurant.name, &body)
}
