// SPDX-License-Identifier: MIT
//! The shipped checks and their explicit registration lists.
//!
//! Discovery is a compile-time list, not a runtime scan: every check is
//! constructed here with exactly the dependencies it needs and handed to
//! the registry in report order.

pub mod custom_errors;
pub mod document_types;
pub mod error_404;
pub mod favicon;
pub mod html_lang;
pub mod image_alt;
pub mod media_root;
pub mod recaptcha;
pub mod recycle_bin;
pub mod redirect_urls;
pub mod robots;
pub mod server_error_page;
pub mod sitemap;
pub mod user_groups;

use std::sync::Arc;

use tracing::debug;

use crate::config::SiteCheckConfig;
use crate::error::Result;
use crate::health::registry::HealthCheckRegistry;
use crate::health::text::TextService;
use crate::services::memory::MemoryCms;
use crate::services::CmsServices;

pub use custom_errors::CustomErrorsCheck;
pub use document_types::DocumentTypeIconCheck;
pub use error_404::Error404ResponseCheck;
pub use favicon::FaviconCheck;
pub use html_lang::HtmlLanguageAttributeCheck;
pub use image_alt::ImageAltTagPropertyCheck;
pub use media_root::MediaRootCheck;
pub use recaptcha::RecaptchaKeyCheck;
pub use recycle_bin::EmptyRecycleBinCheck;
pub use redirect_urls::RedirectUrlManagementCheck;
pub use robots::RobotsTxtCheck;
pub use server_error_page::ServerErrorPageCheck;
pub use sitemap::SiteMapCheck;
pub use user_groups::UserGroupsCheck;

/// Register the file, configuration-document and live-HTTP checks.
pub fn register_site_checks(
    registry: HealthCheckRegistry,
    config: &SiteCheckConfig,
    text: Arc<dyn TextService>,
) -> Result<HealthCheckRegistry> {
    let site = config.site();
    let client = config.http_client()?;
    let base_url = config.base_url.clone();

    Ok(registry
        .with_check(RobotsTxtCheck::new(site.clone(), text.clone()))
        .with_check(ServerErrorPageCheck::new(site, text.clone()))
        .with_check(CustomErrorsCheck::new(
            config.server_config_path(),
            config.settings_config_path(),
            text.clone(),
        ))
        .with_check(RecaptchaKeyCheck::new(
            config.server_config_path(),
            text.clone(),
        ))
        .with_check(FaviconCheck::new(
            client.clone(),
            base_url.clone(),
            text.clone(),
        ))
        .with_check(HtmlLanguageAttributeCheck::new(
            client.clone(),
            base_url.clone(),
            text.clone(),
        ))
        .with_check(SiteMapCheck::new(
            client.clone(),
            base_url.clone(),
            text.clone(),
        ))
        .with_check(Error404ResponseCheck::new(client, base_url, text)))
}

/// Register the CMS-entity checks against the given service backend.
pub fn register_cms_checks(
    registry: HealthCheckRegistry,
    services: &CmsServices,
    operator: &str,
    text: Arc<dyn TextService>,
) -> HealthCheckRegistry {
    registry
        .with_check(DocumentTypeIconCheck::new(
            services.content_types.clone(),
            text.clone(),
        ))
        .with_check(MediaRootCheck::new(services.media.clone(), text.clone()))
        .with_check(ImageAltTagPropertyCheck::new(
            services.media.clone(),
            services.media_types.clone(),
            services.data_types.clone(),
            text.clone(),
        ))
        .with_check(EmptyRecycleBinCheck::new(
            services.content.clone(),
            services.media.clone(),
            services.users.clone(),
            operator,
            text.clone(),
        ))
        .with_check(RedirectUrlManagementCheck::new(
            services.redirects.clone(),
            text.clone(),
        ))
        .with_check(UserGroupsCheck::new(
            services.users.clone(),
            services.sections.clone(),
            text,
        ))
}

/// Build the full registry for a configuration: site checks always, CMS
/// checks when a snapshot backend is configured.
pub fn build_registry(
    config: &SiteCheckConfig,
    text: Arc<dyn TextService>,
) -> Result<HealthCheckRegistry> {
    let registry = register_site_checks(HealthCheckRegistry::new(), config, text.clone())?;

    match &config.cms_snapshot {
        Some(path) => {
            let cms = Arc::new(MemoryCms::from_snapshot_file(path)?);
            let services = CmsServices::from_memory(cms);
            Ok(register_cms_checks(registry, &services, &config.operator, text))
        }
        None => {
            debug!("no CMS snapshot configured; registering site checks only");
            Ok(registry)
        }
    }
}
