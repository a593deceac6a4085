//! Demo data set: two users, two buildings with one entrance each, and one access log per user.

use crate::error::StoreError;
use crate::model::{AccessLog, AccessPoint, Building, NewAccessLog, NewAccessPoint, NewBuilding, NewUser, User};
use crate::store::{Repository, Store};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub buildings: usize,
    pub access_points: usize,
    pub access_logs: usize,
}

fn text(s: &str) -> Option<String> {
    Some(s.to_string())
}

/// Insert the demo records. Fails on the first record the store rejects, e.g. when run twice.
pub async fn seed<S: Store>(store: &S) -> Result<SeedSummary, StoreError> {
    let mut summary = SeedSummary::default();

    for (id, name) in [("user1", "Alice"), ("user2", "Bob")] {
        Repository::<User>::create(store, NewUser { id: text(id), name: text(name) }).await?;
        summary.users += 1;
    }

    for (id, name) in [("building1", "Building A"), ("building2", "Building B")] {
        Repository::<Building>::create(store, NewBuilding { id: text(id), name: text(name) }).await?;
        summary.buildings += 1;
    }

    for (id, building_id) in [("accessPoint1", "building1"), ("accessPoint2", "building2")] {
        Repository::<AccessPoint>::create(
            store,
            NewAccessPoint {
                id: text(id),
                name: text("Main Entrance"),
                building_id: text(building_id),
            },
        )
        .await?;
        summary.access_points += 1;
    }

    for (id, status, user_id, access_point_id) in [
        ("accessLog1", "Granted", "user1", "accessPoint1"),
        ("accessLog2", "Denied", "user2", "accessPoint2"),
    ] {
        Repository::<AccessLog>::create(
            store,
            NewAccessLog {
                id: text(id),
                access_status: text(status),
                access_type: text("Entry"),
                user_id: text(user_id),
                access_point_id: text(access_point_id),
            },
        )
        .await?;
        summary.access_logs += 1;
    }

    tracing::info!(?summary, "seeded demo data");
    Ok(summary)
}
