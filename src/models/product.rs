use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_ref: String,
}

impl Product {
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price)
    }
}

/// Read-only product catalog shown in the shop grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The four sample products the storefront ships with.
    pub fn sample() -> Self {
        let entry = |id, name: &str, description: &str, price, photo: u32| Product {
            id,
            name: name.to_string(),
            description: description.to_string(),
            price,
            image_ref: format!(
                "https://images.pexels.com/photos/{photo}/pexels-photo-{photo}.jpeg?auto=compress&cs=tinysrgb&w=400"
            ),
        };

        Self::new(vec![
            entry(
                1,
                "Wireless Earbuds Pro",
                "Premium noise-canceling wireless earbuds with 24h battery life",
                199.99,
                3394658,
            ),
            entry(
                2,
                "Smart Fitness Watch",
                "Advanced fitness tracking with heart rate monitor and GPS",
                299.99,
                437037,
            ),
            entry(
                3,
                "Mechanical Keyboard RGB",
                "Gaming mechanical keyboard with customizable RGB lighting",
                149.99,
                1772123,
            ),
            entry(
                4,
                "Portable SSD 1TB",
                "Ultra-fast portable SSD with USB-C connectivity",
                129.99,
                4152505,
            ),
        ])
    }

    pub fn find(&self, id: u64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::sample()
    }
}
