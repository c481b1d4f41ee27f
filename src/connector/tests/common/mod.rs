//! In-memory cluster API shared by the connector tests

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use redis_iam_client::{ClientError, Cluster, ClusterApi, Result, Role, User};
use redis_iam_core::Annotations;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Fake cluster API that counts calls per endpoint
#[derive(Default)]
pub struct FakeApi {
    pub users: Vec<User>,
    pub roles: Vec<Role>,
    pub clusters: Vec<Cluster>,

    /// Detail overrides keyed by uid; falls back to `roles`
    pub role_details: HashMap<String, Role>,

    /// Simulated latency on every call
    pub delay: Option<Duration>,

    /// Number of upcoming `list_users` calls that fail with 503
    pub failing_user_calls: Mutex<usize>,

    pub user_calls: AtomicUsize,
    pub role_calls: AtomicUsize,
    pub cluster_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
}

impl FakeApi {
    pub fn new(users: Vec<User>, roles: Vec<Role>) -> Self {
        Self {
            users,
            roles,
            clusters: vec![cluster("prod-cluster")],
            ..Default::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn failing_users(self, times: usize) -> Self {
        *self.failing_user_calls.lock() = times;
        self
    }

    pub fn with_role_detail(mut self, role: Role) -> Self {
        self.role_details.insert(role.uid.to_string(), role);
        self
    }

    pub fn user_calls(&self) -> usize {
        self.user_calls.load(Ordering::SeqCst)
    }

    pub fn role_calls(&self) -> usize {
        self.role_calls.load(Ordering::SeqCst)
    }

    pub fn cluster_calls(&self) -> usize {
        self.cluster_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    async fn pause(&self, cancel: &CancellationToken) -> Result<()> {
        if cancel.is_cancelled() {
            return Err(ClientError::Cancelled);
        }
        if let Some(delay) = self.delay {
            tokio::select! {
                _ = cancel.cancelled() => return Err(ClientError::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ClusterApi for FakeApi {
    async fn list_users(&self, cancel: &CancellationToken) -> Result<(Vec<User>, Annotations)> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        self.pause(cancel).await?;

        {
            let mut failing = self.failing_user_calls.lock();
            if *failing > 0 {
                *failing -= 1;
                return Err(ClientError::Status {
                    status: 503,
                    url: "fake:///v1/users".to_string(),
                    body: "unavailable".to_string(),
                });
            }
        }

        Ok((self.users.clone(), Annotations::new()))
    }

    async fn list_roles(&self, cancel: &CancellationToken) -> Result<(Vec<Role>, Annotations)> {
        self.role_calls.fetch_add(1, Ordering::SeqCst);
        self.pause(cancel).await?;
        Ok((self.roles.clone(), Annotations::new()))
    }

    async fn list_clusters(&self, cancel: &CancellationToken) -> Result<(Vec<Cluster>, Annotations)> {
        self.cluster_calls.fetch_add(1, Ordering::SeqCst);
        self.pause(cancel).await?;
        Ok((self.clusters.clone(), Annotations::new()))
    }

    async fn get_role_details(
        &self,
        role_uid: &str,
        cancel: &CancellationToken,
    ) -> Result<(Role, Annotations)> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.pause(cancel).await?;

        let role = self
            .role_details
            .get(role_uid)
            .cloned()
            .or_else(|| self.roles.iter().find(|r| r.uid.to_string() == role_uid).cloned())
            .ok_or_else(|| ClientError::NotFound {
                url: format!("fake:///v1/roles/{}", role_uid),
            })?;

        Ok((role, Annotations::new()))
    }
}

pub fn user(uid: u64, name: &str, role_uids: Vec<u64>) -> User {
    User {
        uid,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        role: "db_viewer".to_string(),
        status: "active".to_string(),
        role_uids,
        ..Default::default()
    }
}

pub fn role(uid: u64, name: &str, management: &str) -> Role {
    Role {
        uid,
        name: name.to_string(),
        management: management.to_string(),
    }
}

pub fn cluster(name: &str) -> Cluster {
    Cluster {
        name: name.to_string(),
        settings: Default::default(),
    }
}

/// Alice holds Admin; Bob holds Admin and Member
pub fn alice_and_bob() -> FakeApi {
    FakeApi::new(
        vec![user(10, "Alice", vec![1]), user(11, "Bob", vec![1, 2])],
        vec![role(1, "Admin", "admin"), role(2, "Member", "db_viewer")],
    )
}
