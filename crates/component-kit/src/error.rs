// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Error types for component helpers.
//!
//! This module defines [`ComponentError`], the single error enum returned by
//! every fallible operation in the crate.
//!
//! # Error Categories
//!
//! - **Manifest errors**: missing or malformed `manifest.json`
//! - **Attribute errors**: unknown attribute keys and type mismatches
//! - **Resolution errors**: component template or asset not found
//! - **Template errors**: handlebars compilation or rendering failures
//!
//! Errors are always handed back to the caller. Nothing in this crate prints
//! or terminates the process.

use std::path::PathBuf;
use thiserror::Error;

use crate::manifest::AttributeType;

/// The main error type for component operations.
#[derive(Error, Debug)]
pub enum ComponentError {
    /// No manifest document exists at the expected location.
    #[error("Manifest not found at {}", path.display())]
    ManifestNotFound {
        /// The manifest file path that was looked up.
        path: PathBuf,
    },

    /// The manifest document exists but is not a valid manifest.
    #[error("Failed to parse manifest {}: {message}", path.display())]
    ManifestParse {
        /// The manifest file path.
        path: PathBuf,
        /// Parser or validation message.
        message: String,
    },

    /// The requested attribute is not declared in the component manifest.
    #[error("{attribute} key does not exist in the {component} component. Please check your implementation.")]
    UnknownAttribute {
        /// The attribute name the caller asked for.
        attribute: String,
        /// The component the manifest describes.
        component: String,
    },

    /// A supplied attribute value disagrees with its declared type.
    #[error("{attribute} attribute in the {component} component expects {expected} but got {found}")]
    AttributeType {
        /// The attribute name.
        attribute: String,
        /// The component the manifest describes.
        component: String,
        /// The type declared in the manifest.
        expected: AttributeType,
        /// A short name for the JSON type actually supplied.
        found: &'static str,
    },

    /// No template could be located for the component.
    #[error("Unable to locate component by path: {component}")]
    ComponentNotFound {
        /// The component name or path as given by the caller.
        component: String,
    },

    /// The assets manifest has no entry for the requested file.
    #[error("{key} key does not exist in the assets manifest. Please check if the provided key is correct.")]
    AssetNotFound {
        /// The asset key as given by the caller.
        key: String,
    },

    /// Template compilation or rendering failed.
    #[error("Template error in {template}: {message}")]
    Template {
        /// The resolved template path.
        template: String,
        /// Error message from the template engine.
        message: String,
    },

    /// A helper received an argument it cannot work with.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results with [`ComponentError`].
pub type Result<T> = std::result::Result<T, ComponentError>;
