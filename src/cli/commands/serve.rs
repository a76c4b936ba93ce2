//! Run the site server

use std::path::Path;

use folio::config::SiteConfig;
use folio::visitors::Visitors;

use crate::server::tiny_http;

/// Load the config, wire the visitors' sites, and serve until stopped
pub fn serve(config: Option<&Path>, bind: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let mut site_config = SiteConfig::load(config)?;
    if let Some(bind) = bind {
        site_config.server.bind = bind;
    }
    if let Some(port) = port {
        site_config.server.port = port;
    }
    if site_config.admin.account().is_none() {
        log::warn!("no admin account configured; run 'folio passwd <password> --email <email>'");
    }

    let visitors = Visitors::from_config(&site_config)?;
    let addr = format!("{}:{}", site_config.server.bind, site_config.server.port);
    println!("folio listening on http://{addr}");
    tiny_http::serve(visitors, &addr)
}
