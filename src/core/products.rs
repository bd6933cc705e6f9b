//! Catalogue of image products opened in the system browser.

/// Issuing center, used for grouping in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Center {
    Spc,
    Cpc,
}

impl std::fmt::Display for Center {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Center::Spc => "SPC",
            Center::Cpc => "CPC",
        })
    }
}

/// A static image product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    /// Stable identifier used on the command line.
    pub key: &'static str,
    pub title: &'static str,
    pub center: Center,
    pub url: &'static str,
}

pub const PRODUCTS: [Product; 6] = [
    Product {
        key: "categorical",
        title: "Day 1 Categorical Outlook",
        center: Center::Spc,
        url: "https://www.spc.noaa.gov/products/outlook/day1otlk.gif",
    },
    Product {
        key: "tornado",
        title: "Day 1 Tornado Probability",
        center: Center::Spc,
        url: "https://www.spc.noaa.gov/products/outlook/day1probotlk_torn.gif",
    },
    Product {
        key: "wind",
        title: "Day 1 Wind Probability",
        center: Center::Spc,
        url: "https://www.spc.noaa.gov/products/outlook/day1probotlk_wind.gif",
    },
    Product {
        key: "hail",
        title: "Day 1 Hail Probability",
        center: Center::Spc,
        url: "https://www.spc.noaa.gov/products/outlook/day1probotlk_hail.gif",
    },
    Product {
        key: "cpc-temp",
        title: "6-10 Day Temperature Outlook",
        center: Center::Cpc,
        url: "https://www.cpc.ncep.noaa.gov/products/predictions/610day/610temp.new.gif",
    },
    Product {
        key: "cpc-precip",
        title: "6-10 Day Precipitation Outlook",
        center: Center::Cpc,
        url: "https://www.cpc.ncep.noaa.gov/products/predictions/610day/610prcp.new.gif",
    },
];

/// Looks up a product by key, ignoring case.
#[must_use]
pub fn find(key: &str) -> Option<&'static Product> {
    PRODUCTS
        .iter()
        .find(|p| p.key.eq_ignore_ascii_case(key.trim()))
}

/// Opens the product image in the default browser.
///
/// # Errors
///
/// Returns an error if no browser could be launched.
pub fn open(product: &Product) -> std::io::Result<()> {
    tracing::info!(key = product.key, url = product.url, "opening product");
    open::that(product.url)
}
