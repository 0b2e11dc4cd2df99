use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub listing_order: ListingOrder,
    pub db_connect_retries: u32,
}

/// Ordering applied to the question listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingOrder {
    /// Newest question first, as returned by the store.
    Recent,
    /// Upvote/downvote ratio, highest first.
    Engagement,
}

impl ListingOrder {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "engagement" | "ratio" => ListingOrder::Engagement,
            _ => ListingOrder::Recent, // Default to store order
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ListingOrder::Recent => "recent",
            ListingOrder::Engagement => "engagement",
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let listing_order = env::var("LISTING_ORDER")
            .map(|value| ListingOrder::parse(&value))
            .unwrap_or(ListingOrder::Recent);

        Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("PORT")
                .or_else(|_| env::var("SERVER_PORT"))
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap_or(5000),
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-in-production".to_string()),
            listing_order,
            db_connect_retries: env::var("DB_CONNECT_RETRIES")
                .ok()
                .and_then(|value| value.parse().ok())
                .filter(|retries| *retries > 0)
                .unwrap_or(3),
        }
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: 5000,
            database_url: None,
            jwt_secret: "dev-secret-change-in-production".to_string(),
            listing_order: ListingOrder::Recent,
            db_connect_retries: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_order_parsing() {
        assert_eq!(ListingOrder::parse("engagement"), ListingOrder::Engagement);
        assert_eq!(ListingOrder::parse(" Ratio "), ListingOrder::Engagement);
        assert_eq!(ListingOrder::parse("recent"), ListingOrder::Recent);
        assert_eq!(ListingOrder::parse("something-else"), ListingOrder::Recent);
        assert_eq!(ListingOrder::parse(ListingOrder::Engagement.as_str()), ListingOrder::Engagement);
    }

    #[test]
    fn test_server_address() {
        let config = AppConfig {
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            ..AppConfig::default()
        };
        assert_eq!(config.server_address(), "0.0.0.0:8080");
    }
}
