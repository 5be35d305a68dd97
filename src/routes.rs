use crate::{
    api::{dashboard, page},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    // Per-peer limiter; a zero rate is treated as one request per minute
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let requests_per_min = requests_per_min.max(1);
        let per_ms = 60_000 / requests_per_min as u64;
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms.max(1))
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("period and burst size are non-zero");
        Governor::new(&cfg)
    }

    // Rendered page
    cfg.route("/", web::get().to(page::index));

    // JSON views of the same state
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(build_limiter(config.rate_dashboard_per_min))
            .route("/dashboard-data", web::get().to(dashboard::dashboard_data))
            .route("/attendance/today", web::get().to(dashboard::todays_attendance))
            .route("/employees", web::get().to(dashboard::employees)),
    );
}
