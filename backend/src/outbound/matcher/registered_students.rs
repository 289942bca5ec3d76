//! Placeholder matcher that proposes every registered student.
//!
//! No image analysis happens here; the photo reference is ignored and each
//! student is reported with the same fixed confidence. A real recogniser
//! replaces this adapter without touching incident intake.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{StudentMatcher, StudentMatcherError, UserRepository};
use crate::domain::{MatchedStudent, User};

/// Confidence attached to every candidate.
pub const REGISTERED_STUDENT_CONFIDENCE: u8 = 85;

/// [`StudentMatcher`] returning all users whose type is student.
pub struct RegisteredStudentsMatcher<U> {
    users: Arc<U>,
}

impl<U> RegisteredStudentsMatcher<U> {
    /// Matcher reading candidates from `users`.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

fn candidate(user: User) -> MatchedStudent {
    MatchedStudent {
        id: user.id,
        name: user.name,
        student_id: user.student_id,
        email: user.email,
        department: user.department,
        photo: user.registration_photo.or(user.profile_photo),
        confidence: REGISTERED_STUDENT_CONFIDENCE,
    }
}

#[async_trait]
impl<U> StudentMatcher for RegisteredStudentsMatcher<U>
where
    U: UserRepository,
{
    async fn find_matches(
        &self,
        image_path: &str,
    ) -> Result<Vec<MatchedStudent>, StudentMatcherError> {
        let users = self
            .users
            .list()
            .await
            .map_err(|err| StudentMatcherError::unavailable(err.to_string()))?;
        let matches: Vec<_> = users
            .into_iter()
            .filter(User::is_student)
            .map(candidate)
            .collect();
        debug!(image_path, candidates = matches.len(), "student matcher ran");
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{MockUserRepository, UserPersistenceError};
    use crate::domain::{Role, UserId, UserType};

    fn user(username: &str, user_type: UserType, photos: (Option<&str>, Option<&str>)) -> User {
        User {
            id: UserId::random(),
            username: username.to_owned(),
            password_hash: "$argon2id$stub".into(),
            role: Role::User,
            user_type,
            name: format!("{username} name"),
            email: format!("{username}@bamidele.edu.ng"),
            student_id: (user_type == UserType::Student).then(|| "2789".to_owned()),
            department: "Computer Science".into(),
            profile_photo: photos.0.map(str::to_owned),
            registration_photo: photos.1.map(str::to_owned),
            created_at: Utc::now(),
            extra: serde_json::Map::new(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn returns_every_student_with_fixed_confidence() {
        let mut repo = MockUserRepository::new();
        repo.expect_list().times(1).return_once(|| {
            Ok(vec![
                user("admin", UserType::Admin, (None, None)),
                user("student001", UserType::Student, (Some("/uploads/profiles/p.png"), None)),
                user("staff001", UserType::Staff, (None, None)),
                user(
                    "student002",
                    UserType::Student,
                    (Some("/uploads/profiles/p2.png"), Some("/uploads/profiles/r2.png")),
                ),
                user("student003", UserType::Student, (None, None)),
            ])
        });
        let matcher = RegisteredStudentsMatcher::new(Arc::new(repo));

        let matches = matcher
            .find_matches("/uploads/incidents/scene.jpg")
            .await
            .expect("matches");

        let names: Vec<_> = matches.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            ["student001 name", "student002 name", "student003 name"]
        );
        assert!(matches.iter().all(|m| m.confidence == 85));
        assert_eq!(matches[0].photo.as_deref(), Some("/uploads/profiles/p.png"));
        assert_eq!(matches[1].photo.as_deref(), Some("/uploads/profiles/r2.png"));
        assert_eq!(matches[2].photo, None);
        assert_eq!(matches[0].student_id.as_deref(), Some("2789"));
    }

    #[rstest]
    #[tokio::test]
    async fn repository_failure_makes_matcher_unavailable() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .return_once(|| Err(UserPersistenceError::read("disk gone")));
        let matcher = RegisteredStudentsMatcher::new(Arc::new(repo));

        let err = matcher.find_matches("/uploads/incidents/x.jpg").await;

        assert!(matches!(err, Err(StudentMatcherError::Unavailable { .. })));
    }
}
