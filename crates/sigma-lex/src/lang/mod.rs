#![forbid(unsafe_code)]

//! Per-language scanners.
//!
//! C/C++, Java, D and JavaScript share the C-family rules in [`cpp`] and the
//! base rules in [`crate::base`]. HTML embeds JavaScript and CSS; JSP embeds
//! Java on top of HTML. Makefile, INI and TeX are line or markup oriented and
//! only use the cursor.

pub mod asm;
pub mod cpp;
pub mod css;
pub mod d;
pub mod html;
pub mod ini;
pub mod java;
pub mod javascript;
pub mod jsp;
pub mod makefile;
pub mod python;
pub mod tex;

pub use asm::{AsmKind, AsmScanner};
pub use cpp::{CppKind, CppScanner};
pub use css::{CssKind, CssScanner, STYLE_END};
pub use d::{DKind, DScanner};
pub use html::{HtmlKind, HtmlScanner};
pub use ini::{IniKind, IniScanner};
pub use java::{JavaKind, JavaScanner};
pub use javascript::{JsKind, JsScanner, SCRIPT_END};
pub use jsp::{JspScanner, SCRIPTLET_END, ScriptletScanner};
pub use makefile::{MakefileKind, MakefileScanner};
pub use python::{PythonKind, PythonScanner};
pub use tex::{TexKind, TexScanner};
