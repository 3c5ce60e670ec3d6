//! Cursor builders shaped like a libclang traversal of
//!
//! ```c
//! // n.h
//! namespace N {
//!     int f(int x) { return x; }
//! }
//! // a.cc
//! #include "n.h"
//! int main() { return 0; }
//! // b.cc
//! #include "n.h"
//! void g() { f(1); }
//! ```
#![allow(dead_code)]

use xrefscope_plugin::{CursorKind, RawCursorRecord, RawLocation, RecordedUnit};

pub const F_USR: &str = "c:@N@N@F@f#I#";

pub fn cursor(
    kind: CursorKind,
    name: &str,
    file: &str,
    (offset, line, column): (u32, u32, u32),
    len: u32,
) -> RawCursorRecord {
    RawCursorRecord::new(
        kind,
        name,
        RawLocation::new(file, offset, line, column),
        RawLocation::new(file, offset + len, line, column + len),
    )
}

/// `f` as seen from a unit named `unit`.
pub fn f_definition(unit: &str) -> RawCursorRecord {
    cursor(CursorKind::FUNCTION_DECL, "f", "n.h", (14, 2, 5), 30)
        .as_definition()
        .with_usr(F_USR)
        .with_type("int (int)")
        .with_parent(CursorKind::NAMESPACE, "N")
        .with_parent(CursorKind::TRANSLATION_UNIT, unit)
}

pub fn header_cursors(unit: &str) -> Vec<RawCursorRecord> {
    vec![
        cursor(CursorKind::NAMESPACE, "N", "n.h", (0, 1, 1), 50)
            .with_parent(CursorKind::TRANSLATION_UNIT, unit),
        f_definition(unit),
        cursor(CursorKind::PARM_DECL, "x", "n.h", (20, 2, 11), 5)
            .with_usr("c:n.h@20@N@N@F@f#I#@x")
            .with_type("int")
            .with_parent(CursorKind::FUNCTION_DECL, "f")
            .with_parent(CursorKind::NAMESPACE, "N")
            .with_parent(CursorKind::TRANSLATION_UNIT, unit),
        cursor(CursorKind::COMPOUND_STMT, "", "n.h", (27, 2, 18), 17)
            .with_parent(CursorKind::FUNCTION_DECL, "f")
            .with_parent(CursorKind::NAMESPACE, "N"),
    ]
}

pub fn unit_a() -> RecordedUnit {
    let mut cursors = header_cursors("a.cc");
    cursors.push(
        cursor(CursorKind::FUNCTION_DECL, "main", "a.cc", (15, 2, 5), 24)
            .as_definition()
            .with_usr("c:@F@main#")
            .with_type("int ()")
            .with_parent(CursorKind::TRANSLATION_UNIT, "a.cc"),
    );
    RecordedUnit::new("a.cc", cursors)
}

pub fn unit_b() -> RecordedUnit {
    let mut cursors = header_cursors("b.cc");
    let target = f_definition("b.cc");
    cursors.extend([
        cursor(CursorKind::FUNCTION_DECL, "g", "b.cc", (15, 2, 6), 18)
            .as_definition()
            .with_usr("c:@F@g#")
            .with_type("void ()")
            .with_parent(CursorKind::TRANSLATION_UNIT, "b.cc"),
        cursor(CursorKind::CALL_EXPR, "f", "b.cc", (26, 2, 12), 4)
            .with_usr(F_USR)
            .with_type("int")
            .with_referenced(target.clone())
            .with_parent(CursorKind::FUNCTION_DECL, "g")
            .with_parent(CursorKind::TRANSLATION_UNIT, "b.cc"),
        cursor(CursorKind::DECL_REF_EXPR, "f", "b.cc", (26, 2, 12), 1)
            .with_usr(F_USR)
            .with_type("int (int)")
            .with_referenced(target)
            .with_parent(CursorKind::FUNCTION_DECL, "g")
            .with_parent(CursorKind::TRANSLATION_UNIT, "b.cc"),
    ]);
    RecordedUnit::new("b.cc", cursors)
}
