//! BBCode export for rich-text editor documents
//!
//!     This crate converts an editor document into phpBB-flavoured BBCode. It reads two trees
//!     side by side: the semantic model (where inline formatting lives as text attributes) and
//!     the rendered view (where structure such as list containers lives as elements), and
//!     produces a single BBCode string.
//!
//!     TLDR: for rule authors:
//!         - Inline formatting is a rule over text attributes (see ./rules/inline.rs)
//!         - Block structure is a rule over element names, on the model or the view side (see ./rules/block.rs)
//!         - Both kinds are registered in a RuleRegistry; the defaults cover bold, underline, italic, links, paragraphs, soft breaks and lists
//!         - Tests render their models with the reference host in ./render.rs, so no editor is needed
//!
//! Architecture
//!
//!     The converter never reaches into a host's layout. It needs the two fragments and a
//!     PositionMapper that translates positions between them (./mapping.rs). The walk keeps a
//!     position in each tree and moves them forward together: text runs go to the inline
//!     processor, elements to the block processor, which recurses into their content.
//!
//!     This is a pure lib, it powers the bbcode cli but makes no assumption about a shell
//!     environment: no printing, no env vars, no files.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── lib.rs
//!     ├── converter.rs            # Converter and the lockstep walk
//!     ├── mapping.rs              # PositionMapper contract and the table-backed Mapper
//!     ├── position.rs             # Typed model/view positions and ranges
//!     ├── render.rs               # Reference host: model -> view + Mapper
//!     ├── model                   # Semantic tree and attributes
//!     ├── view                    # Rendered tree
//!     ├── rules                   # Inline/block rules, priorities, registry
//!     ├── processors              # Inline and block processors
//!     └── attribute_tree          # Interval tree, builder and merger
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── common                  # Document builders shared by the suites
//!     ├── inline                  # Inline formatting through the full pipeline
//!     ├── block                   # Paragraphs, breaks and lists
//!     └── properties              # Tag balance over generated documents
//!
//!     Note that rust does not by default discover tests in subdirectories, so they are included
//!     as modules from tests/lib.rs.
//!
//! Core Algorithms
//!
//!     The hard part is producing properly nested tags from formatting that overlaps freely in
//!     the model. Each text run is loaded into an interval tree, one leaf per text node, and the
//!     merger (./attribute_tree/merger.rs) lifts shared attributes into wrapper nodes one rule at
//!     a time. Serializing the result depth-first gives balanced tags by construction.
//!
//!     Rule priority decides nesting: rules merged earlier end up inside rules merged later, so
//!     highest-priority rules (links) are innermost.
//!
//! Limitations
//!
//!     Literal text is not escaped: `[`, `]` and `=` pass through unchanged. Lists are flat.
//!
pub mod attribute_tree;
pub mod converter;
pub mod error;
pub mod mapping;
pub mod model;
pub mod position;
pub mod processors;
pub mod render;
pub mod rules;
pub mod view;

pub use converter::{Converter, Lockstep};
pub use error::ExportError;
pub use mapping::{Mapper, PositionMapper};
pub use position::{ModelPosition, ModelRange, ViewPosition, ViewRange};
pub use rules::{BlockRule, InlineRule, LinkRule, Priority, RuleRegistry, Side, StaticInlineRule};

/// Renders `fragment` with the reference host and converts it with the
/// default rules.
pub fn to_bbcode(fragment: &model::Fragment) -> String {
    let (view, mapper) = render::render(fragment);
    Converter::default().convert(fragment, &view, &mapper)
}
