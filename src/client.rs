use once_cell::sync::Lazy;

/// Shared blocking HTTP client for provider API calls.
pub static BLOCKING_CLIENT: Lazy<reqwest::blocking::Client> = Lazy::new(|| {
    reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .user_agent(concat!("ec2ctl/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("failed to build blocking reqwest client")
});
