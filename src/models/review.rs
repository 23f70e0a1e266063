// src/models/review.rs
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ReviewError, ValidationError};
use crate::models::address::Address;

/// Star rating between 1 and 5 inclusive.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, ValidationError> {
        match value {
            0 => Err(ValidationError::RatingRequired),
            v if v > Self::MAX => Err(ValidationError::RatingOutOfRange(v)),
            v => Ok(Self(v)),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// Opaque key handed out by the content store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Review body kept off-chain. Immutable once stored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPayload {
    pub rating: Rating,
    pub text: String,
    pub created_at: i64, // milliseconds since epoch
    pub product_id: u64,
}

/// Entry returned by the registry's `getAllReviews`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub reviewer: Address,
    pub product_id: u64,
    #[serde(rename = "ipfsCID")]
    pub content_id: ContentId,
    pub timestamp: u64, // block time, seconds
}

/// Entry returned by the registry's `getProductReviews`, which omits the product id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductReviewRecord {
    pub reviewer: Address,
    #[serde(rename = "ipfsCID")]
    pub content_id: ContentId,
    pub timestamp: u64,
}

impl ProductReviewRecord {
    pub fn for_product(self, product_id: u64) -> ReviewRecord {
        ReviewRecord {
            reviewer: self.reviewer,
            product_id,
            content_id: self.content_id,
            timestamp: self.timestamp,
        }
    }
}

/// What the review form collects before anything is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReviewDraft {
    pub rating: u8,
    pub text: String,
}

impl ReviewDraft {
    pub fn new(rating: u8, text: impl Into<String>) -> Self {
        Self {
            rating,
            text: text.into(),
        }
    }

    /// Checks the rating and text, returning the trimmed pieces ready to store.
    pub fn validate(&self) -> Result<(Rating, &str), ReviewError> {
        let rating = Rating::new(self.rating)?;
        let text = self.text.trim();
        if text.is_empty() {
            return Err(ValidationError::TextRequired.into());
        }
        Ok((rating, text))
    }

    pub fn into_payload(self, product_id: u64, created_at: i64) -> Result<ReviewPayload, ReviewError> {
        let (rating, text) = self.validate()?;
        Ok(ReviewPayload {
            rating,
            text: text.to_string(),
            created_at,
            product_id,
        })
    }
}
