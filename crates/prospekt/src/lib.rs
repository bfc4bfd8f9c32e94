pub mod parser;
pub mod scraper;
pub mod types;
pub mod utils;
pub mod validity;

pub use scraper::{Fetch, ScraperConfig, ScraperError, WebScraper, run};

pub(crate) const WEB_URL: &str = "https://www.prospektmaschine.de/hypermarkte/";
pub(crate) const OUTPUT_FILE: &str = "leaflets.json";
