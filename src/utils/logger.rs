use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "house_price_serve=info,tower_http=info";
const VERBOSE_FILTER: &str = "house_price_serve=debug,tower_http=debug,info";

fn build_filter(verbose: bool, directives: Option<&str>) -> EnvFilter {
    // RUST_LOG 優先，其次是設定檔
    EnvFilter::try_from_default_env().unwrap_or_else(|_| match directives {
        Some(directives) => EnvFilter::new(directives),
        None if verbose => EnvFilter::new(VERBOSE_FILTER),
        None => EnvFilter::new(DEFAULT_FILTER),
    })
}

pub fn init_cli_logger(verbose: bool) {
    init_text_logger(verbose, None);
}

pub fn init_text_logger(verbose: bool, directives: Option<&str>) {
    tracing_subscriber::registry()
        .with(build_filter(verbose, directives))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(verbose: bool, directives: Option<&str>) {
    tracing_subscriber::registry()
        .with(build_filter(verbose, directives))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(), // 部署環境用 JSON，方便 log 收集
        )
        .init();
}
