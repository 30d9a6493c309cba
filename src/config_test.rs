use super::*;

#[test]
fn new_strips_trailing_slashes() {
    let config = ApiConfig::new("https://api.nexusart.com.br//").unwrap();
    assert_eq!(config.base_url(), "https://api.nexusart.com.br");
}

#[test]
fn new_rejects_empty_url() {
    assert_eq!(ApiConfig::new("   "), Err(ConfigError::Empty));
}

#[test]
fn new_rejects_missing_scheme() {
    assert_eq!(
        ApiConfig::new("api.nexusart.com.br"),
        Err(ConfigError::Scheme("api.nexusart.com.br".to_owned()))
    );
}

#[test]
fn url_for_joins_path_without_double_slash() {
    let config = ApiConfig::new("http://localhost:8000/").unwrap();
    assert_eq!(config.url_for("/api/auth/me", &[]), "http://localhost:8000/api/auth/me");
}

#[test]
fn url_for_encodes_query_pairs() {
    let config = ApiConfig::new("http://localhost:8000").unwrap();
    let query = vec![
        ("page".to_owned(), "2".to_owned()),
        ("search".to_owned(), "pizza & soda".to_owned()),
    ];
    assert_eq!(
        config.url_for("/api/generations", &query),
        "http://localhost:8000/api/generations?page=2&search=pizza+%26+soda"
    );
}

#[test]
fn default_config_is_valid() {
    let config = ApiConfig::default();
    assert!(config.base_url().starts_with("http"));
}
