//! HTML rendering with templates compiled into the binary.

use minijinja::{context, Environment};
use openfoodfacts_lookup::ProductRecord;

pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn load() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("base.html", include_str!("../templates/base.html"))?;
        env.add_template("home.html", include_str!("../templates/home.html"))?;
        env.add_template("product.html", include_str!("../templates/product.html"))?;
        Ok(Self { env })
    }

    pub fn home(&self, default_barcodes: &[String]) -> Result<String, minijinja::Error> {
        self.env
            .get_template("home.html")?
            .render(context! { default_barcodes => default_barcodes })
    }

    pub fn products(&self, products: &[ProductRecord]) -> Result<String, minijinja::Error> {
        self.env
            .get_template("product.html")?
            .render(context! { products => products })
    }
}

#[cfg(test)]
mod tests {
    use openfoodfacts_lookup::Variant;

    use super::*;

    #[test]
    fn product_page_lists_every_nutrient_label() {
        let templates = Templates::load().unwrap();
        let records = vec![
            ProductRecord::not_found("111", Variant::Extended),
            ProductRecord::fetch_failed("222", Variant::Basic),
        ];

        let html = templates.products(&records).unwrap();
        assert!(html.contains("111"));
        assert!(html.contains("Product not found"));
        assert!(html.contains("Error fetching data"));
        for label in ["Energy (kcal)", "Saturated Fat", "Protein", "Proteins", "Sodium"] {
            assert!(html.contains(label), "missing {label}");
        }
        assert!(html.contains("Not available"));
    }

    #[test]
    fn product_page_escapes_upstream_text() {
        let templates = Templates::load().unwrap();
        let mut record = ProductRecord::not_found("1", Variant::Basic);
        record.name = "<script>alert(1)</script>".into();
        record.error = false;

        let html = templates.products(&[record]).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn home_page_links_defaults() {
        let templates = Templates::load().unwrap();
        let html = templates
            .home(&["3017620422003".to_string(), "3168930000020".to_string()])
            .unwrap();
        assert!(html.contains("/product?barcodes=3017620422003,3168930000020"));
    }

    #[test]
    fn home_page_url_encodes_each_default() {
        let templates = Templates::load().unwrap();
        let html = templates
            .home(&["12&34".to_string(), "56#7".to_string()])
            .unwrap();
        assert!(html.contains("/product?barcodes=12%2634,56%237"));
        assert!(!html.contains("barcodes=12&"));
    }

    #[test]
    fn product_link_url_encodes_barcode() {
        let templates = Templates::load().unwrap();
        let record = ProductRecord::not_found("12&34", Variant::Basic);

        let html = templates.products(&[record]).unwrap();
        assert!(html.contains("href=\"/product/12%2634\""));
    }
}
