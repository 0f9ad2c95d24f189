//! JSON-API envelope
//!
//! Every request and response body is wrapped in a document of the form
//! `{"data": {"type": ..., "id": ..., "attributes": {...}, "relationships": {...}}}`
//! (or `{"data": [...]}` for collections). Resource types describe their
//! place in that envelope through [`JsonApiResource`]; the attributes are
//! the type's own serde representation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, TfeError};

/// Identity contract between a resource type and the envelope.
pub trait JsonApiResource {
    /// Value of the envelope's `type` member.
    const TYPE_NAME: &'static str;

    /// Primary id written to the envelope, if the value has one.
    fn resource_id(&self) -> Option<&str>;

    /// Receives the envelope's primary id after decoding.
    fn set_resource_id(&mut self, _id: String) {}

    /// Receives each to-one relationship reference after decoding.
    fn set_relationship(&mut self, _name: &str, _target: ResourceIdentifier) {}
}

/// Top-level document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<D> {
    pub data: D,
}

/// A document carrying one resource.
pub type SingleDocument<T> = Document<ResourceObject<T>>;

/// A document carrying a list of resources.
pub type CollectionDocument<T> = Document<Vec<ResourceObject<T>>>;

/// One resource inside a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject<A> {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub attributes: A,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<String, Relationship>,
}

/// A named link from one resource to others.
///
/// Only `data` is read; `links` and `meta` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RelationshipData>,
}

/// Linkage of a relationship: a single reference or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationshipData {
    One(ResourceIdentifier),
    Many(Vec<ResourceIdentifier>),
}

/// `{type, id}` pair naming a related resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub type_name: String,
    pub id: String,
}

impl<'a, T> SingleDocument<&'a T>
where
    T: JsonApiResource + Serialize,
{
    /// Wrap a value for sending. Relationships are never written.
    pub fn wrap(resource: &'a T) -> Self {
        Document {
            data: ResourceObject {
                type_name: T::TYPE_NAME.to_string(),
                id: resource.resource_id().map(str::to_string),
                attributes: resource,
                relationships: BTreeMap::new(),
            },
        }
    }
}

impl<T: JsonApiResource> ResourceObject<T> {
    /// Unwrap into the resource value, applying id and to-one relationships.
    ///
    /// # Errors
    /// Returns `TfeError::Envelope` if `type` does not match `T::TYPE_NAME`.
    pub fn into_resource(self) -> Result<T> {
        if self.type_name != T::TYPE_NAME {
            return Err(TfeError::Envelope(format!(
                "expected resource type '{}', got '{}'",
                T::TYPE_NAME,
                self.type_name
            )));
        }

        let mut value = self.attributes;
        if let Some(id) = self.id {
            value.set_resource_id(id);
        }
        for (name, relationship) in self.relationships {
            if let Some(RelationshipData::One(target)) = relationship.data {
                value.set_relationship(&name, target);
            }
        }
        Ok(value)
    }
}

impl<T: JsonApiResource> SingleDocument<T> {
    /// Unwrap the single resource this document carries.
    pub fn into_resource(self) -> Result<T> {
        self.data.into_resource()
    }
}

impl<T: JsonApiResource> CollectionDocument<T> {
    /// Unwrap every resource, preserving server order.
    pub fn into_resources(self) -> Result<Vec<T>> {
        self.data.into_iter().map(ResourceObject::into_resource).collect()
    }
}
