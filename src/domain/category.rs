use serde::{Deserialize, Serialize};

use crate::domain::multilingual::MultilingualText;
use crate::domain::types::{CategoryId, CategorySlug};

/// Category whose title is stored as one column per schema language.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub slug: CategorySlug,
    pub title: MultilingualText,
}

/// Data required to insert or overwrite a [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub slug: CategorySlug,
    pub title: MultilingualText,
}
