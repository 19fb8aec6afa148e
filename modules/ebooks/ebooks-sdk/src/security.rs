use uuid::Uuid;

/// `SecurityContext` carries the identity of the requester through a request.
///
/// Built by the authentication middleware from the bearer token (or as an
/// anonymous context when no credentials were presented) and passed to every
/// service call. Policies only look at [`subject_id`](Self::subject_id),
/// [`is_admin`](Self::is_admin) and [`is_anonymous`](Self::is_anonymous).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SecurityContext {
    /// Authenticated subject, `None` for anonymous requests.
    subject_id: Option<Uuid>,
    /// Administrative privilege flag. Always `false` for anonymous requests.
    #[serde(default)]
    is_admin: bool,
}

impl SecurityContext {
    /// Create a new `SecurityContext` builder
    #[must_use]
    pub fn builder() -> SecurityContextBuilder {
        SecurityContextBuilder::default()
    }

    /// Create an anonymous `SecurityContext` with no subject and no privileges
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            subject_id: None,
            is_admin: false,
        }
    }

    /// Get the authenticated subject ID, if any
    #[must_use]
    pub fn subject_id(&self) -> Option<Uuid> {
        self.subject_id
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.subject_id.is_none()
    }

    /// Whether the subject holds administrative privilege. Never true for an
    /// anonymous context, however it was constructed.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_admin && self.subject_id.is_some()
    }

    /// Whether this context represents the given subject.
    ///
    /// Anonymous contexts never match, and a missing `other` never matches.
    #[must_use]
    pub fn is_subject(&self, other: Option<Uuid>) -> bool {
        match (self.subject_id, other) {
            (Some(me), Some(other)) => me == other,
            _ => false,
        }
    }
}

impl Default for SecurityContext {
    fn default() -> Self {
        Self::anonymous()
    }
}

#[derive(Default)]
pub struct SecurityContextBuilder {
    subject_id: Option<Uuid>,
    is_admin: bool,
}

impl SecurityContextBuilder {
    #[must_use]
    pub fn subject_id(mut self, subject_id: Uuid) -> Self {
        self.subject_id = Some(subject_id);
        self
    }

    #[must_use]
    pub fn admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }

    /// Build the context. A builder without a subject yields an anonymous
    /// context, and the admin flag is dropped in that case.
    #[must_use]
    pub fn build(self) -> SecurityContext {
        SecurityContext {
            subject_id: self.subject_id,
            is_admin: self.subject_id.is_some() && self.is_admin,
        }
    }
}
