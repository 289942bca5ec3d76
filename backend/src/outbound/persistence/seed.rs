//! Data directory initialisation and the demo accounts.

use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{Role, User, UserId, UserType};

use super::{Collection, JsonStore, StoreError};

/// Failures raised while preparing the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    /// A collection file could not be checked or created.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// A demo password could not be hashed.
    #[error(transparent)]
    Hash(#[from] PasswordHashError),
}

struct DemoAccount {
    username: &'static str,
    password: &'static str,
    role: Role,
    user_type: UserType,
    name: &'static str,
    email: &'static str,
    student_id: Option<&'static str>,
    department: &'static str,
}

const DEMO_ACCOUNTS: [DemoAccount; 3] = [
    DemoAccount {
        username: "admin",
        password: "admin123",
        role: Role::Admin,
        user_type: UserType::Admin,
        name: "System Administrator",
        email: "admin@bamidele.edu.ng",
        student_id: None,
        department: "IT Department",
    },
    DemoAccount {
        username: "student001",
        password: "student123",
        role: Role::User,
        user_type: UserType::Student,
        name: "Fagbuaro Babatunde Michael",
        email: "fagbuaro.babatunde@bamidele.edu.ng",
        student_id: Some("2789"),
        department: "Computer Science",
    },
    DemoAccount {
        username: "staff001",
        password: "staff123",
        role: Role::User,
        user_type: UserType::Staff,
        name: "Dr. John Smith",
        email: "john.smith@bamidele.edu.ng",
        student_id: None,
        department: "Computer Science",
    },
];

/// Make sure every collection file exists.
///
/// `incidents.json` and `alerts.json` start as empty arrays. `users.json`
/// receives the demo accounts when `seed_demo_users` is set, otherwise an
/// empty array. Existing files are never touched.
///
/// # Errors
/// Returns [`SeedError`] when a file cannot be checked or written, or a demo
/// password cannot be hashed.
pub async fn initialise_store<H>(
    store: &JsonStore,
    hasher: &H,
    clock: &dyn Clock,
    seed_demo_users: bool,
) -> Result<(), SeedError>
where
    H: PasswordHasher + ?Sized,
{
    for collection in [Collection::Incidents, Collection::Alerts] {
        store.create_if_missing::<User>(collection, &[]).await?;
    }

    if !seed_demo_users {
        store.create_if_missing::<User>(Collection::Users, &[]).await?;
        return Ok(());
    }
    if store.exists(Collection::Users).await? {
        return Ok(());
    }

    let users = demo_users(hasher, clock).await?;
    if store.create_if_missing(Collection::Users, &users).await? {
        info!(count = users.len(), root = %store.root(), "seeded demo users");
    }
    Ok(())
}

async fn demo_users<H>(hasher: &H, clock: &dyn Clock) -> Result<Vec<User>, PasswordHashError>
where
    H: PasswordHasher + ?Sized,
{
    let created_at = clock.utc();
    let mut users = Vec::with_capacity(DEMO_ACCOUNTS.len());
    for account in &DEMO_ACCOUNTS {
        users.push(User {
            id: UserId::random(),
            username: account.username.to_owned(),
            password_hash: hasher.hash(account.password).await?,
            role: account.role,
            user_type: account.user_type,
            name: account.name.to_owned(),
            email: account.email.to_owned(),
            student_id: account.student_id.map(str::to_owned),
            department: account.department.to_owned(),
            profile_photo: None,
            registration_photo: None,
            created_at,
            extra: serde_json::Map::new(),
        });
    }
    Ok(users)
}
