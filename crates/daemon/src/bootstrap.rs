//! Adapter wiring (Composition Root)

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::settings::{OutputKind, Settings, SourceSettings};
use poolwatch_core::port::{AlertSink, LogWriter, StatsSource};
use poolwatch_infra_system::command_source::DEFAULT_ENV_ALLOWLIST;
use poolwatch_infra_system::{
    CommandStatsSource, FileStatsSource, HttpStatsSource, StdoutLogWriter, TracingLogWriter,
    WebhookAlertSink,
};

pub fn build_stats_source(settings: &SourceSettings) -> Result<Arc<dyn StatsSource>> {
    let source: Arc<dyn StatsSource> = match settings {
        SourceSettings::File { path } => {
            let source = FileStatsSource::new(shellexpand::tilde(path).into_owned());
            info!(path = %source.path().display(), "Reading stats from file");
            Arc::new(source)
        }
        SourceSettings::Http { url, timeout_secs } => {
            info!(url = %redact_url(url), "Reading stats from HTTP endpoint");
            Arc::new(
                HttpStatsSource::new(url.clone(), Duration::from_secs(*timeout_secs))
                    .context("Failed to build HTTP stats source")?,
            )
        }
        SourceSettings::Command {
            command,
            args,
            timeout_secs,
            env,
        } => {
            info!(command = %command, args = ?args, env = ?env, "Reading stats from command");
            let source = CommandStatsSource::new(
                command.clone(),
                args.clone(),
                Duration::from_secs(*timeout_secs),
            );
            if env.is_empty() {
                Arc::new(source)
            } else {
                let allowlist = DEFAULT_ENV_ALLOWLIST
                    .iter()
                    .map(|s| s.to_string())
                    .chain(env.iter().cloned())
                    .collect();
                Arc::new(source.with_env_allowlist(allowlist))
            }
        }
    };
    Ok(source)
}

/// Alert sink, `None` when alerts are disabled or no channel is configured
pub fn build_alert_sink(settings: &Settings) -> Result<Option<Arc<dyn AlertSink>>> {
    if !settings.alerts_enabled {
        info!("Alerts disabled");
        return Ok(None);
    }
    let Some(url) = &settings.alert.webhook_url else {
        info!("No alert channel configured, level changes are only logged");
        return Ok(None);
    };

    let sink = WebhookAlertSink::new(url.clone(), Duration::from_secs(settings.alert.timeout_secs))
        .context("Failed to build webhook alert sink")?;
    info!(url = %redact_url(url), "Alerts go to webhook");
    Ok(Some(Arc::new(sink)))
}

/// URL safe for logs: user info, query and fragment removed
///
/// Stats and webhook URLs carry their credentials in those parts.
pub fn redact_url(url: &str) -> String {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let url = &url[..end];

    let (scheme, rest) = match url.split_once("://") {
        Some((scheme, rest)) => (Some(scheme), rest),
        None => (None, url),
    };
    let authority_end = rest.find('/').unwrap_or(rest.len());
    let rest = match rest[..authority_end].rfind('@') {
        Some(at) => &rest[at + 1..],
        None => rest,
    };

    match scheme {
        Some(scheme) => format!("{}://{}", scheme, rest),
        None => rest.to_string(),
    }
}

pub fn build_log_writer(output: OutputKind) -> Arc<dyn LogWriter> {
    match output {
        OutputKind::Tracing => Arc::new(TracingLogWriter),
        OutputKind::Stdout => Arc::new(StdoutLogWriter),
    }
}
