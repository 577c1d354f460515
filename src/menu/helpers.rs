//! Menu Business Logic Helpers
//!
//! This module contains the currency formatter, the product list renderer and
//! the menu/product page bodies.

use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use super::models::{Product, ProductListView, ProductSummary};
use crate::restaurant::models::{ConsumptionMethod, Restaurant};
use crate::view::{escape, layout, ImageHostAllowList};

/// Placeholder rendered when a restaurant has no products
pub const EMPTY_MENU_MESSAGE: &str = "Nenhum produto disponível no momento.";

/// Currency symbol for BRL, followed by a no-break space as `pt-BR` does
const CURRENCY_PREFIX: &str = "R$\u{a0}";

// =============================================================================
// Currency Formatter
// =============================================================================

/// Formats an amount as Brazilian reais, e.g. `R$ 1.234,50`.
///
/// # Behaviour
///
/// * Always two decimal places; half-cents round away from zero.
/// * Thousands are grouped with `.`, the decimal separator is `,`.
/// * Deterministic: the output depends on the numeric value only, so `19.9`
///   and `19.90` format identically.
pub fn format_currency(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // Near the 96-bit limit the scale may stay below 2; cents are padded below.
    rounded.rescale(2);

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().to_string();
    let (integer, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!(
        "{sign}{CURRENCY_PREFIX}{},{cents:0<2}",
        group_thousands(integer)
    )
}

/// Inserts `.` every three digits from the right.
fn group_thousands(integer: &str) -> String {
    let len = integer.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    grouped
}

// =============================================================================
// Product List Renderer
// =============================================================================

/// Detail page target of a product.
pub fn product_href(slug: &str, product_id: Uuid) -> String {
    format!("/{slug}/menu/{product_id}")
}

/// Builds the card of one product. The description is copied unchanged.
pub fn summarize_product(
    slug: &str,
    product: &Product,
    images: &ImageHostAllowList,
) -> ProductSummary {
    ProductSummary {
        id: product.id,
        href: product_href(slug, product.id),
        name: product.name.clone(),
        description: product.description.clone(),
        price: format_currency(product.price),
        image_url: images.permitted(&product.image_url).map(str::to_owned),
    }
}

/// Maps an ordered product sequence to exactly one card per product.
///
/// The slug is an explicit input so the renderer depends on nothing but its
/// arguments.
pub fn build_product_list(
    slug: &str,
    products: &[Product],
    images: &ImageHostAllowList,
) -> ProductListView {
    let items: Vec<ProductSummary> = products
        .iter()
        .map(|product| summarize_product(slug, product, images))
        .collect();
    let empty_message = items.is_empty().then_some(EMPTY_MENU_MESSAGE);

    ProductListView {
        slug: slug.to_owned(),
        items,
        empty_message,
    }
}

fn render_product_card(item: &ProductSummary) -> String {
    let thumbnail = item
        .image_url
        .as_deref()
        .map(|src| crate::view::img_tag(src, &item.name, "product-image"))
        .unwrap_or_default();

    format!(
        concat!(
            r#"<a class="product-card" href="{href}" data-product-id="{id}">"#,
            "<div>",
            r#"<h3 class="product-name">{name}</h3>"#,
            r#"<p class="product-description line-clamp-2">{description}</p>"#,
            r#"<p class="product-price">{price}</p>"#,
            "</div>",
            r#"<div class="product-thumbnail">{thumbnail}</div>"#,
            "</a>"
        ),
        href = escape(&item.href),
        id = item.id,
        name = escape(&item.name),
        description = escape(&item.description),
        price = escape(&item.price),
        thumbnail = thumbnail,
    )
}

pub fn render_product_list(view: &ProductListView) -> String {
    if let Some(message) = view.empty_message {
        return format!(
            r#"<div class="product-list"><p class="empty-state">{}</p></div>"#,
            escape(message)
        );
    }

    let cards: String = view.items.iter().map(render_product_card).collect();
    format!(r#"<div class="product-list">{cards}</div>"#)
}

// =============================================================================
// Pages
// =============================================================================

/// Renders the menu page: cover, restaurant header, chosen method and list.
pub fn render_menu_page(
    restaurant: &Restaurant,
    method: ConsumptionMethod,
    list: &ProductListView,
    images: &ImageHostAllowList,
) -> String {
    let body = format!(
        concat!(
            r#"<div class="menu-page" data-consumption-method="{method}">"#,
            r#"<div class="menu-cover">{cover}</div>"#,
            r#"<div class="menu-header">{avatar}<div><h2>{name}</h2><p>{description}</p></div></div>"#,
            r#"<p class="consumption-method-badge">{label}</p>"#,
            "{list}",
            "</div>"
        ),
        method = method,
        cover = images.img(&restaurant.cover_image_url, &restaurant.name, "cover-image"),
        avatar = images.img(&restaurant.avatar_image_url, &restaurant.name, "avatar-image"),
        name = escape(&restaurant.name),
        description = escape(&restaurant.description),
        label = escape(method.label()),
        list = render_product_list(list),
    );

    layout(&format!("{} | Cardápio", restaurant.name), &body)
}

/// Renders the product detail page with the full description and ingredients.
pub fn render_product_page(
    restaurant: &Restaurant,
    product: &Product,
    images: &ImageHostAllowList,
) -> String {
    let ingredients = if product.ingredients.is_empty() {
        String::new()
    } else {
        let entries: String = product
            .ingredients
            .iter()
            .map(|ingredient| format!("<li>{}</li>", escape(ingredient)))
            .collect();
        format!(r#"<h4>Ingredientes</h4><ul class="ingredients">{entries}</ul>"#)
    };

    let body = format!(
        concat!(
            r#"<div class="product-page" data-product-id="{id}">"#,
            r#"<div class="product-hero">{image}</div>"#,
            r#"<div class="restaurant-badge">{avatar}<span>{restaurant}</span></div>"#,
            "<h2>{name}</h2>",
            r#"<p class="product-price">{price}</p>"#,
            "<h4>Sobre</h4>",
            r#"<p class="product-description">{description}</p>"#,
            "{ingredients}",
            r#"<a class="back-link" href="/{slug}">Voltar</a>"#,
            "</div>"
        ),
        id = product.id,
        image = images.img(&product.image_url, &product.name, "product-image"),
        avatar = images.img(&restaurant.avatar_image_url, &restaurant.name, "avatar-image"),
        restaurant = escape(&restaurant.name),
        name = escape(&product.name),
        price = escape(&format_currency(product.price)),
        description = escape(&product.description),
        ingredients = ingredients,
        slug = escape(&restaurant.slug),
    );

    layout(&product.name, &body)
}
