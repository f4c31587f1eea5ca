//! # nub-core
//!
//! Core types for meeting-feedback analytics.
//!
//! This crate provides the data model every analytic is computed over:
//! - Entity records (people, teams, meetings, questions, actions) as a closed
//!   tagged set, each with a canonical empty instance
//! - Kind-checked [`collection::EntityCollection`] with projection support
//! - [`assertion::Assertion`] and [`assertion::AssertionSet`], the observations
//!   analytics consume
//! - Value, scale and verdict types shared with the analytics engine
//! - Cross-cutting error types

pub mod assertion;
pub mod collection;
pub mod entities;
pub mod entity_ref;
pub mod enums;
pub mod errors;
pub mod value;

pub use assertion::{Assertion, AssertionSet, Criteria, ResponseCollection};
pub use collection::{EntityCollection, Kinded, Project, Projection};
pub use entities::{
    Action, Attribute, Entity, Meeting, MeetingNubbyClassification, Person, Question,
    RelevanceCollection, RelevanceScore, ResponseVerdict, System, Team,
};
pub use entity_ref::EntityRef;
pub use errors::CoreError;
pub use value::{AnswerScale, BelievableChoice, Value};
