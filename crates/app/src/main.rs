//! Back-office connectivity smoke tool.
//!
//! Wires a REST port and a list controller for every entity kind, refreshes
//! each collection once, and reports the row counts. Exits non-zero when
//! any collection fails to load, so the tool doubles as a deployment health
//! check for the hosted database.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use futures::future::join_all;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bureau_controller::confirm::AlwaysConfirm;
use bureau_controller::list::LoadState;
use bureau_controller::notify::{ToastBus, ToastVariant};
use bureau_controller::ListController;
use bureau_entities::campaign::Campaign;
use bureau_entities::client::Client;
use bureau_entities::content_plan::ContentPlan;
use bureau_entities::kind::EntityKind;
use bureau_entities::offer::Offer;
use bureau_entities::package::Package;
use bureau_entities::prestation::Prestation;
use bureau_entities::project::Project;
use bureau_entities::social_post::SocialPost;
use bureau_entities::specification::Specification;
use bureau_entities::task::Task;
use bureau_rest::{RestConfig, RestPort};

/// Fetch one collection and report how many rows it holds.
async fn probe<E: EntityKind>(
    config: &RestConfig,
    toasts: ToastBus,
) -> (&'static str, Result<usize, String>) {
    let port = match RestPort::<E>::new(config) {
        Ok(port) => Arc::new(port),
        Err(err) => return (E::TABLE, Err(err.to_string())),
    };
    let mut controller = ListController::new(port, toasts, Arc::new(AlwaysConfirm));
    controller.refresh().await;
    let outcome = match controller.load_state() {
        LoadState::Loaded => Ok(controller.records().len()),
        LoadState::Failed(message) => Err(message.clone()),
        state => Err(format!("unexpected load state: {state:?}")),
    };
    (E::TABLE, outcome)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bureau=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = RestConfig::from_env();
    tracing::info!(base_url = %config.base_url, "Loaded REST configuration");

    // --- Toast sink ---
    // Controllers publish toasts regardless of a UI being mounted; in this
    // shell they land in the log.
    let toasts = ToastBus::default();
    let mut toast_rx = toasts.subscribe();
    tokio::spawn(async move {
        while let Ok(toast) = toast_rx.recv().await {
            match toast.variant {
                ToastVariant::Default => {
                    tracing::info!(title = %toast.title, detail = %toast.description, "toast")
                }
                ToastVariant::Destructive => {
                    tracing::warn!(title = %toast.title, detail = %toast.description, "toast")
                }
            }
        }
    });

    // --- Probe every collection ---
    type Probe<'a> = Pin<Box<dyn Future<Output = (&'static str, Result<usize, String>)> + 'a>>;
    let probes: Vec<Probe> = vec![
        Box::pin(probe::<Client>(&config, toasts.clone())),
        Box::pin(probe::<Package>(&config, toasts.clone())),
        Box::pin(probe::<Prestation>(&config, toasts.clone())),
        Box::pin(probe::<Offer>(&config, toasts.clone())),
        Box::pin(probe::<Project>(&config, toasts.clone())),
        Box::pin(probe::<Task>(&config, toasts.clone())),
        Box::pin(probe::<Specification>(&config, toasts.clone())),
        Box::pin(probe::<Campaign>(&config, toasts.clone())),
        Box::pin(probe::<ContentPlan>(&config, toasts.clone())),
        Box::pin(probe::<SocialPost>(&config, toasts.clone())),
    ];
    let results = join_all(probes).await;

    let mut failures = 0usize;
    for (table, outcome) in results {
        match outcome {
            Ok(count) => tracing::info!(table, rows = count, "collection reachable"),
            Err(message) => {
                failures += 1;
                tracing::error!(table, error = %message, "collection unreachable");
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} collection(s) failed to load");
    }
    tracing::info!("All collections reachable");
    Ok(())
}
