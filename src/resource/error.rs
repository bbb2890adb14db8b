// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0
//! Resource provider errors.

use thiserror::Error;

use crate::error::BuilderError;

/// Resource provider error.
#[derive(Debug, Error)]
pub enum ResourceProviderError {
    /// Conflict with an existing entry.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Domain not found.
    #[error("domain {0} not found")]
    DomainNotFound(String),

    /// Project not found.
    #[error("project {0} not found")]
    ProjectNotFound(String),

    /// Structures builder error.
    #[error(transparent)]
    StructBuilder(#[from] BuilderError),

    /// Configured backend driver is not known.
    #[error("unsupported driver {0}")]
    UnsupportedDriver(String),
}
