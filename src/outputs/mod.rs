//! Static artifact generation for the published site.
//!
//! This module contains submodules responsible for writing the build's
//! output files:
//!
//! # Submodules
//!
//! - [`json`]: the article dataset, presenter feed, and build log
//! - [`site`]: the fixed `index.html` page shell
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── articles.json   # canonical Article array (camelCase fields)
//! ├── display.json    # presenter block lists, one array per article
//! ├── build_log.json  # build metadata and warnings
//! └── index.html      # static page shell; the client JS fetches the data
//! ```
//!
//! All artifacts use write-if-changed semantics so a no-op build leaves the
//! published tree untouched.

pub mod json;
pub mod site;
