use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes tracing for the whole process. `RUST_LOG` wins when set;
/// otherwise the configured level applies while the HTTP and SMTP stacks
/// are held at warn so scan output stays readable.
pub fn init_logging(log_level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{},hyper=warn,reqwest=warn,warp=warn,lettre=warn",
            log_level
        ))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .init();

    tracing::info!("Logging initialized at level: {}", log_level);
}
