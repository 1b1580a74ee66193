//! Shopping basket serialization.
//!
//! The gateway accepts a basket in one of two shapes:
//!
//! - [`XmlBasketFormatter`]: the `BasketXML` document, with discount lines
//!   (negative prices) moved into a separate `<discounts>` block.
//! - [`LegacyBasketFormatter`]: the older colon-delimited `Basket` string,
//!   `count:name:qty:unit:tax:gross:total:...`, which has no discount concept.
//!
//! Item names and discount names are restricted to different character sets.

use serde::Serialize;

use crate::amount::Amount;
use crate::constants::{MAX_NAME_LENGTH, ZERO_TAX};

/// Punctuation allowed in item names, alongside ASCII alphanumerics.
const ITEM_NAME_SPECIALS: &str = " +'/\\&:,.-{}";

/// Punctuation allowed in discount names. Note: no `&`.
const DISCOUNT_NAME_SPECIALS: &str = " +'/\\:,.-{};_@()^\"~[]$=!#?|";

/// One basket line. A negative unit price denotes a discount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub name: String,
    pub quantity: u32,
    pub price: Amount,
}

impl CartItem {
    pub fn new(name: impl Into<String>, quantity: u32, price: Amount) -> Self {
        Self {
            name: name.into(),
            quantity,
            price,
        }
    }

    pub fn is_discount(&self) -> bool {
        self.price.is_negative()
    }

    /// Quantity times unit price.
    pub fn line_total(&self) -> Amount {
        self.price.times(self.quantity)
    }
}

/// Ordered basket contents. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Basket {
    items: Vec<CartItem>,
}

impl Basket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: CartItem) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_discounts(&self) -> bool {
        self.items.iter().any(CartItem::is_discount)
    }
}

impl From<Vec<CartItem>> for Basket {
    fn from(items: Vec<CartItem>) -> Self {
        Self { items }
    }
}

impl FromIterator<CartItem> for Basket {
    fn from_iter<I: IntoIterator<Item = CartItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

fn filter_name(name: &str, specials: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || specials.contains(*c))
        .take(MAX_NAME_LENGTH)
        .collect();
    kept.trim().to_string()
}

/// Strip characters the gateway rejects in item names, truncate to 100
/// characters and trim.
pub fn filter_item_name(name: &str) -> String {
    filter_name(name, ITEM_NAME_SPECIALS)
}

/// Strip characters the gateway rejects in discount names, truncate to 100
/// characters and trim.
pub fn filter_discount_name(name: &str) -> String {
    filter_name(name, DISCOUNT_NAME_SPECIALS)
}

/// Renders a basket into the string sent to the gateway.
pub trait BasketFormatter: Send + Sync {
    /// Protocol field the output is sent under.
    fn field_name(&self) -> &'static str;

    fn serialize(&self, basket: &Basket) -> String;
}

/// `BasketXML` document.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlBasketFormatter;

/// Colon-delimited `Basket` string.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyBasketFormatter;

/// Formatter selected by the old-basket-format toggle.
pub fn formatter_for(use_old_basket_format: bool) -> &'static dyn BasketFormatter {
    if use_old_basket_format {
        &LegacyBasketFormatter
    } else {
        &XmlBasketFormatter
    }
}

#[derive(Serialize)]
#[serde(rename = "basket")]
struct BasketXml {
    #[serde(rename = "item")]
    items: Vec<ItemXml>,
    #[serde(skip_serializing_if = "Option::is_none")]
    discounts: Option<DiscountsXml>,
}

#[derive(Serialize)]
struct ItemXml {
    description: String,
    quantity: u32,
    #[serde(rename = "unitNetAmount")]
    unit_net_amount: String,
    #[serde(rename = "unitTaxAmount")]
    unit_tax_amount: &'static str,
    #[serde(rename = "unitGrossAmount")]
    unit_gross_amount: String,
    #[serde(rename = "totalGrossAmount")]
    total_gross_amount: String,
}

#[derive(Serialize)]
struct DiscountsXml {
    discount: Vec<DiscountXml>,
}

#[derive(Serialize)]
struct DiscountXml {
    fixed: String,
    description: String,
}

impl From<&CartItem> for ItemXml {
    fn from(item: &CartItem) -> Self {
        Self {
            description: filter_item_name(&item.name),
            quantity: item.quantity,
            unit_net_amount: item.price.to_string(),
            unit_tax_amount: ZERO_TAX,
            unit_gross_amount: item.price.to_string(),
            total_gross_amount: item.line_total().to_string(),
        }
    }
}

impl From<&CartItem> for DiscountXml {
    fn from(item: &CartItem) -> Self {
        Self {
            fixed: item.line_total().negate().to_string(),
            description: filter_discount_name(&item.name),
        }
    }
}

impl BasketFormatter for XmlBasketFormatter {
    fn field_name(&self) -> &'static str {
        crate::constants::field::BASKET_XML
    }

    /// Empty basket yields `""`, never an empty `<basket/>`. A serializer
    /// failure also yields `""` and is logged.
    fn serialize(&self, basket: &Basket) -> String {
        if basket.is_empty() {
            return String::new();
        }

        let (discounts, items): (Vec<&CartItem>, Vec<&CartItem>) =
            basket.items().iter().partition(|item| item.is_discount());

        let document = BasketXml {
            items: items.into_iter().map(ItemXml::from).collect(),
            discounts: (!discounts.is_empty()).then(|| DiscountsXml {
                discount: discounts.into_iter().map(DiscountXml::from).collect(),
            }),
        };

        match quick_xml::se::to_string(&document) {
            Ok(xml) => xml,
            Err(e) => {
                tracing::warn!(error = %e, "basket XML serialization failed, sending no basket");
                String::new()
            }
        }
    }
}

impl BasketFormatter for LegacyBasketFormatter {
    fn field_name(&self) -> &'static str {
        crate::constants::field::BASKET
    }

    fn serialize(&self, basket: &Basket) -> String {
        let mut out = basket.len().to_string();
        for item in basket.items() {
            // Colon is the field delimiter.
            let name = filter_item_name(&item.name).replace(':', " ");
            out.push_str(&format!(
                ":{name}:{}:{}:{ZERO_TAX}:{}:{}",
                item.quantity,
                item.price,
                item.price,
                item.line_total()
            ));
        }
        out
    }
}
