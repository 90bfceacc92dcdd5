//! Reshaping daemon records into the facade's response summaries.
//!
//! Everything here is a pure function over already-fetched data. Replica
//! counts are computed once per request from a single task listing, so
//! they describe the daemon at that instant only.

use std::collections::HashMap;

use swarmlens_types::{
    ContainerRecord, ContainerSummary, ServiceMode, ServiceRecord, ServiceSummary, TaskRecord,
};

/// Map each container to its `{id, image}` summary, preserving order.
pub fn summarize_containers(containers: &[ContainerRecord]) -> Vec<ContainerSummary> {
    containers
        .iter()
        .map(|c| ContainerSummary {
            id: c.id.clone(),
            image: c.image.clone(),
        })
        .collect()
}

/// Count tasks in the `running` state per owning service id.
///
/// Tasks without a service id are skipped. Services with no running task
/// are absent from the map.
pub fn running_tasks_by_service(tasks: &[TaskRecord]) -> HashMap<String, u64> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for task in tasks.iter().filter(|t| t.state.is_running()) {
        if let Some(service_id) = &task.service_id {
            let count = counts.entry(service_id.clone()).or_insert(0);
            *count = count.saturating_add(1);
        }
    }
    counts
}

/// Build one summary per service, in the order the daemon listed them.
///
/// Replicated services report their running-task count against the
/// replica target. Every other mode is reported as global with
/// `current_replicas = 0` and `max_replicas = 1`; per-node counts for
/// global services are not computed.
pub fn summarize_services(services: &[ServiceRecord], tasks: &[TaskRecord]) -> Vec<ServiceSummary> {
    let running = running_tasks_by_service(tasks);

    services
        .iter()
        .map(|service| {
            let (current_replicas, max_replicas, is_global) = match service.mode {
                ServiceMode::Replicated { replicas } => (
                    running.get(&service.id).copied().unwrap_or(0),
                    replicas,
                    false,
                ),
                ServiceMode::Global => (0, 1, true),
            };

            ServiceSummary {
                image_name: service.name.clone(),
                image_name_hash: service.image.clone(),
                current_replicas,
                max_replicas,
                last_updated: service.updated_at,
                is_global,
            }
        })
        .collect()
}
