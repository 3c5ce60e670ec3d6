use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use xrefscope_api::models::Linkage;

/// AST node kind as reported by the parser.
///
/// Open-ended: a parser adapter may report any kind; only kinds registered in
/// a [`crate::CursorConvention`] are indexed. The constants name the libclang
/// kinds used by the C-family preset.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CursorKind(Cow<'static, str>);

impl CursorKind {
    pub const TRANSLATION_UNIT: CursorKind = CursorKind(Cow::Borrowed("TranslationUnit"));
    pub const NAMESPACE: CursorKind = CursorKind(Cow::Borrowed("Namespace"));
    pub const STRUCT_DECL: CursorKind = CursorKind(Cow::Borrowed("StructDecl"));
    pub const UNION_DECL: CursorKind = CursorKind(Cow::Borrowed("UnionDecl"));
    pub const CLASS_DECL: CursorKind = CursorKind(Cow::Borrowed("ClassDecl"));
    pub const CLASS_TEMPLATE: CursorKind = CursorKind(Cow::Borrowed("ClassTemplate"));
    pub const ENUM_DECL: CursorKind = CursorKind(Cow::Borrowed("EnumDecl"));
    pub const TYPEDEF_DECL: CursorKind = CursorKind(Cow::Borrowed("TypedefDecl"));
    pub const ENUM_CONSTANT_DECL: CursorKind = CursorKind(Cow::Borrowed("EnumConstantDecl"));
    pub const FIELD_DECL: CursorKind = CursorKind(Cow::Borrowed("FieldDecl"));
    pub const VAR_DECL: CursorKind = CursorKind(Cow::Borrowed("VarDecl"));
    pub const PARM_DECL: CursorKind = CursorKind(Cow::Borrowed("ParmDecl"));
    pub const FUNCTION_DECL: CursorKind = CursorKind(Cow::Borrowed("FunctionDecl"));
    pub const FUNCTION_TEMPLATE: CursorKind = CursorKind(Cow::Borrowed("FunctionTemplate"));
    pub const CXX_METHOD: CursorKind = CursorKind(Cow::Borrowed("CXXMethod"));
    pub const CONSTRUCTOR: CursorKind = CursorKind(Cow::Borrowed("Constructor"));
    pub const DESTRUCTOR: CursorKind = CursorKind(Cow::Borrowed("Destructor"));
    pub const TYPE_REF: CursorKind = CursorKind(Cow::Borrowed("TypeRef"));
    pub const VARIABLE_REF: CursorKind = CursorKind(Cow::Borrowed("VariableRef"));
    pub const DECL_REF_EXPR: CursorKind = CursorKind(Cow::Borrowed("DeclRefExpr"));
    pub const MEMBER_REF_EXPR: CursorKind = CursorKind(Cow::Borrowed("MemberRefExpr"));
    pub const CALL_EXPR: CursorKind = CursorKind(Cow::Borrowed("CallExpr"));
    pub const MACRO_DEFINITION: CursorKind = CursorKind(Cow::Borrowed("MacroDefinition"));
    pub const MACRO_EXPANSION: CursorKind = CursorKind(Cow::Borrowed("MacroExpansion"));
    pub const COMPOUND_STMT: CursorKind = CursorKind(Cow::Borrowed("CompoundStmt"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CursorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CursorKind {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

/// A source position in the parser's native numbering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawLocation {
    pub file: String,
    pub offset: u32,
    pub line: u32,
    pub column: u32,
}

impl RawLocation {
    pub fn new(file: impl Into<String>, offset: u32, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            offset,
            line,
            column,
        }
    }
}

/// One ancestor on a cursor's semantic parent chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SemanticParent {
    pub kind: CursorKind,
    pub name: String,
}

impl SemanticParent {
    pub fn new(kind: CursorKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

/// One node yielded by the parser's traversal, already resolved by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCursorRecord {
    pub kind: CursorKind,
    pub begin: RawLocation,
    pub end: RawLocation,
    #[serde(default)]
    pub spelling: String,
    /// Ancestors, innermost first. The translation unit root, if reported, is last.
    #[serde(default)]
    pub parents: Vec<SemanticParent>,
    #[serde(default)]
    pub linkage: Linkage,
    /// The entity this cursor refers to, for reference-like kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced: Option<Box<RawCursorRecord>>,
    /// Stable cross-translation-unit symbol id (a USR for libclang).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usr: Option<String>,
    #[serde(default)]
    pub is_definition: bool,
    #[serde(default)]
    pub type_spelling: String,
}

impl RawCursorRecord {
    pub fn new(
        kind: CursorKind,
        spelling: impl Into<String>,
        begin: RawLocation,
        end: RawLocation,
    ) -> Self {
        Self {
            kind,
            begin,
            end,
            spelling: spelling.into(),
            parents: Vec::new(),
            linkage: Linkage::None,
            referenced: None,
            usr: None,
            is_definition: false,
            type_spelling: String::new(),
        }
    }

    pub fn with_parent(mut self, kind: CursorKind, name: impl Into<String>) -> Self {
        self.parents.push(SemanticParent::new(kind, name));
        self
    }

    pub fn with_parents(mut self, parents: Vec<SemanticParent>) -> Self {
        self.parents = parents;
        self
    }

    pub fn with_linkage(mut self, linkage: Linkage) -> Self {
        self.linkage = linkage;
        self
    }

    pub fn with_usr(mut self, usr: impl Into<String>) -> Self {
        self.usr = Some(usr.into());
        self
    }

    pub fn with_type(mut self, type_spelling: impl Into<String>) -> Self {
        self.type_spelling = type_spelling.into();
        self
    }

    pub fn with_referenced(mut self, target: RawCursorRecord) -> Self {
        self.referenced = Some(Box::new(target));
        self
    }

    pub fn as_definition(mut self) -> Self {
        self.is_definition = true;
        self
    }
}
