pub mod message_route;
pub mod scrape_route;
