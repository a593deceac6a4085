//! Shared application state for all routes. Built once at startup from the chosen store.

use crate::model::{AccessLog, AccessPoint, Building, User};
use crate::service::{RelationService, Service};
use crate::store::{Probe, Store};
use axum::extract::FromRef;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub users: Service<User>,
    pub buildings: Service<Building>,
    pub access_points: Service<AccessPoint>,
    pub access_logs: Service<AccessLog>,
    pub relations: RelationService,
    pub probe: Arc<dyn Probe>,
}

impl AppState {
    pub fn new<S: Store>(store: Arc<S>) -> Self {
        AppState {
            users: Service::new(store.clone()),
            buildings: Service::new(store.clone()),
            access_points: Service::new(store.clone()),
            access_logs: Service::new(store.clone()),
            relations: RelationService::new(store.clone()),
            probe: store,
        }
    }
}

macro_rules! service_from_state {
    ($entity:ty, $field:ident) => {
        impl FromRef<AppState> for Service<$entity> {
            fn from_ref(state: &AppState) -> Self {
                state.$field.clone()
            }
        }
    };
}

service_from_state!(User, users);
service_from_state!(Building, buildings);
service_from_state!(AccessPoint, access_points);
service_from_state!(AccessLog, access_logs);

impl FromRef<AppState> for RelationService {
    fn from_ref(state: &AppState) -> Self {
        state.relations.clone()
    }
}
