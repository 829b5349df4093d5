use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use freight_core::{ClientRegistry, Dashboard, DashboardError, PendingRequest};
use freight_http::HttpClientFactory;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::commands::{Command, HELP};
use crate::logging::{log_task_result, set_log_level};
use crate::settings::Settings;
use crate::view::render;

/// Registry with every backend this build ships.
pub fn build_registry() -> ClientRegistry {
    let mut registry = ClientRegistry::new();
    registry.register(Box::new(HttpClientFactory));
    registry
}

/// Build the client named by `settings` and wrap it in a dashboard.
pub async fn connect(settings: &Settings) -> Result<Dashboard> {
    let config = settings.client_config();
    debug!(backend = %config.backend, base_url = %config.base_url, "creating booking client");

    let api = build_registry()
        .create(&config)
        .await
        .with_context(|| format!("cannot create '{}' client", config.backend))?;

    Ok(Dashboard::new(Arc::from(api)).with_policy(settings.dashboard.response_policy))
}

/// Whether the input loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Redraw,
    Quit,
}

/// Apply one command. Network commands read their payload now and send it
/// from a task on `tasks`, so input stays live while requests are
/// outstanding.
pub fn apply(
    dashboard: &Arc<Dashboard>,
    command: Command,
    tasks: &mut JoinSet<()>,
    out: &mut impl Write,
) -> Result<Flow> {
    match command {
        Command::SelectTab(tab) => dashboard.select_tab(tab),
        Command::Set { field, value } => {
            if let Err(e) = dashboard.update_field(&field, value) {
                writeln!(out, "{e}")?;
                return Ok(Flow::Continue);
            }
        }
        Command::Query(query) => dashboard.set_tracking_query(query),
        Command::Estimate => spawn_request(tasks, "estimate", dashboard.start_estimate()),
        Command::Book => spawn_request(tasks, "booking", dashboard.start_booking()),
        Command::Track(query) => {
            if let Some(query) = query {
                dashboard.set_tracking_query(query);
            }
            spawn_request(tasks, "tracking", dashboard.start_tracking());
        }
        Command::Dismiss => dashboard.dismiss_notice(),
        Command::ClearError => dashboard.clear_error(),
        Command::LogLevel(level) => {
            match set_log_level(&level) {
                Ok(()) => writeln!(out, "log level set to '{level}'")?,
                Err(e) => writeln!(out, "{e}")?,
            }
            return Ok(Flow::Continue);
        }
        Command::Show => {}
        Command::Help => {
            writeln!(out, "{HELP}")?;
            return Ok(Flow::Continue);
        }
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Redraw)
}

/// Send a request whose payload was read when the command was applied.
/// A request refused by validation is already recorded in the state.
fn spawn_request<T: Send + 'static>(
    tasks: &mut JoinSet<()>,
    task_name: &'static str,
    started: Result<PendingRequest<T>, DashboardError>,
) {
    match started {
        Ok(request) => {
            tasks.spawn(async move {
                log_task_result(task_name, request.await.map(drop));
            });
        }
        Err(e) => log_task_result(task_name, Err(e)),
    }
}

fn redraw(
    dashboard: &Dashboard,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "{}", render(&dashboard.snapshot()))?;
    out.flush()?;
    Ok(())
}

/// Read commands from `input` until it ends or `quit` is entered, redrawing
/// after each command and each completed request.
///
/// At end of input, outstanding requests are awaited so their results are
/// shown. `quit` abandons them.
pub async fn run<R, W>(
    dashboard: Arc<Dashboard>,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut tasks = JoinSet::new();
    redraw(&dashboard, out)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("cannot read command")? else {
                    break;
                };
                let command = match Command::parse(&line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(e) => {
                        writeln!(out, "{e}")?;
                        continue;
                    }
                };
                match apply(&dashboard, command, &mut tasks, out)? {
                    Flow::Continue => {}
                    Flow::Redraw => redraw(&dashboard, out)?,
                    Flow::Quit => {
                        if !tasks.is_empty() {
                            info!(pending = tasks.len(), "quitting with requests still in flight");
                        }
                        tasks.abort_all();
                        return Ok(());
                    }
                }
            }
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                if let Err(e) = joined {
                    warn!(error = %e, "request task did not complete");
                }
                redraw(&dashboard, out)?;
            }
        }
    }

    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            warn!(error = %e, "request task did not complete");
        }
        redraw(&dashboard, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_ships_http_backend() {
        assert_eq!(build_registry().backends(), vec!["http"]);
    }

    #[tokio::test]
    async fn connect_uses_configured_policy() {
        let mut settings = Settings::default();
        settings.dashboard.response_policy = freight_core::ResponsePolicy::LatestRequest;

        let dashboard = connect(&settings).await.unwrap();

        assert_eq!(
            dashboard.policy(),
            freight_core::ResponsePolicy::LatestRequest
        );
    }

    #[tokio::test]
    async fn connect_rejects_unknown_backend() {
        let mut settings = Settings::default();
        settings.api.backend = "carrier-pigeon".to_string();

        let err = connect(&settings).await.err().unwrap();

        assert!(format!("{err:#}").contains("carrier-pigeon"));
    }
}
