use std::fmt;

use tweetservice_clients::ClientError;

/// An identifier or argument a service operation cannot run without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    TweetId,
    CommentId,
    UserId,
    AuthorId,
    PictureId,
    Hashtag,
    Word,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Field::TweetId => "Tweet id should not be null",
            Field::CommentId => "Comment id should not be null",
            Field::UserId => "User id should not be null",
            Field::AuthorId => "Author id should not be null",
            Field::PictureId => "Picture id should not be null",
            Field::Hashtag => "hashtag should not be null",
            Field::Word => "the word should not be null",
        };
        f.write_str(message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    MissingField(Field),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    ServiceUnavailable(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<ClientError> for ServiceError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Unavailable(_) => ServiceError::ServiceUnavailable(err.to_string()),
            other => ServiceError::Internal(other.into()),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Unwraps a required argument or fails with [`ServiceError::MissingField`].
pub fn required<T>(value: Option<T>, field: Field) -> ServiceResult<T> {
    value.ok_or(ServiceError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_messages() {
        let err = required::<i64>(None, Field::TweetId).unwrap_err();
        assert_eq!(err.to_string(), "Tweet id should not be null");
        assert!(matches!(err, ServiceError::MissingField(Field::TweetId)));

        assert_eq!(required(Some(3), Field::UserId).unwrap(), 3);
    }

    #[test]
    fn test_unavailable_client_becomes_service_unavailable() {
        let err: ServiceError = ClientError::Unavailable("follow-service".to_string()).into();
        assert!(matches!(err, ServiceError::ServiceUnavailable(_)));
        assert_eq!(err.to_string(), "follow-service is not accessible");
    }
}
