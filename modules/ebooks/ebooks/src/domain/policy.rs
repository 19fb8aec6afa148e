//! Access policies.
//!
//! A policy is a predicate over `(identity, verb, optional object)`:
//! - [`AdminOrReadOnly`] is request-scoped and guards ebooks before any row is
//!   touched.
//! - [`ReviewAuthorOrReadOnly`] is object-scoped and runs only after the
//!   review has been loaded by id.
//!
//! Service operations name the policy they apply and call
//! [`AccessPolicy::check`] / [`AccessPolicy::check_object`], which turn a
//! deny into [`DomainError::Unauthenticated`] for anonymous callers and
//! [`DomainError::Forbidden`] otherwise.

use ebooks_sdk::{Review, SecurityContext};
use http::Method;
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Read-only verbs that never mutate state.
#[must_use]
pub fn is_safe_method(method: &Method) -> bool {
    *method == Method::GET || *method == Method::HEAD || *method == Method::OPTIONS
}

/// Resources with a single, optional owner.
pub trait OwnedByUser {
    /// `None` when the owner no longer exists.
    fn owner_id(&self) -> Option<Uuid>;
}

impl OwnedByUser for Review {
    fn owner_id(&self) -> Option<Uuid> {
        self.review_author
    }
}

pub trait AccessPolicy {
    type Object: ?Sized;

    /// Request-level decision, evaluated before any object lookup.
    fn has_permission(&self, _ctx: &SecurityContext, _method: &Method) -> bool {
        true
    }

    /// Object-level decision, evaluated once the target has been resolved.
    fn has_object_permission(
        &self,
        _ctx: &SecurityContext,
        _method: &Method,
        _obj: &Self::Object,
    ) -> bool {
        true
    }

    fn check(&self, ctx: &SecurityContext, method: &Method) -> Result<(), DomainError> {
        if self.has_permission(ctx, method) {
            Ok(())
        } else {
            Err(denied(ctx))
        }
    }

    fn check_object(
        &self,
        ctx: &SecurityContext,
        method: &Method,
        obj: &Self::Object,
    ) -> Result<(), DomainError> {
        if self.has_object_permission(ctx, method, obj) {
            Ok(())
        } else {
            Err(denied(ctx))
        }
    }
}

fn denied(ctx: &SecurityContext) -> DomainError {
    if ctx.is_anonymous() {
        DomainError::Unauthenticated
    } else {
        DomainError::Forbidden
    }
}

/// Admins get full access; everyone else only safe verbs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdminOrReadOnly;

impl AccessPolicy for AdminOrReadOnly {
    type Object = ();

    fn has_permission(&self, ctx: &SecurityContext, method: &Method) -> bool {
        ctx.is_admin() || is_safe_method(method)
    }
}

/// Safe verbs for everyone; mutations only for the object's owner.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewAuthorOrReadOnly;

impl AccessPolicy for ReviewAuthorOrReadOnly {
    type Object = dyn OwnedByUser + Sync;

    fn has_object_permission(
        &self,
        ctx: &SecurityContext,
        method: &Method,
        obj: &Self::Object,
    ) -> bool {
        is_safe_method(method) || ctx.is_subject(obj.owner_id())
    }
}

/// Safe verbs for everyone; mutations need an authenticated identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthenticatedOrReadOnly;

impl AccessPolicy for AuthenticatedOrReadOnly {
    type Object = ();

    fn has_permission(&self, ctx: &SecurityContext, method: &Method) -> bool {
        !ctx.is_anonymous() || is_safe_method(method)
    }
}
