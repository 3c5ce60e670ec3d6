mod common;

use common::{cursor, unit_a, unit_b};
use xrefscope_api::models::{EntityKind, EntityRole, Linkage, Specifier};
use xrefscope_core::{CollisionPolicy, IndexConfig, IndexSession, InsertOutcome, Occurrence, XrefError};
use xrefscope_plugin::{CursorKind, RecordedUnit, TableConvention};

fn lines(session: &IndexSession) -> Vec<String> {
    session.index().records().map(|o| o.to_record().to_string()).collect()
}

#[test]
fn test_header_parsed_twice_is_indexed_once() {
    let mut session = IndexSession::c_family(IndexConfig::default());
    session.index_unit(&mut unit_a()).unwrap();
    session.index_unit(&mut unit_a()).unwrap();

    let f = session.index().get("f").expect("f is indexed");
    assert_eq!(f.specifier(), Specifier::Value);
    assert_eq!(f.definitions().count(), 1);
    assert_eq!(f.declarations().count(), 0);
    let def = f.definitions().next().unwrap();
    assert_eq!(def.scope(), "::N::");
    assert_eq!(def.kind(), EntityKind::Function);

    let x = session.index().get("x").expect("x is indexed");
    assert_eq!(x.len(), 1);
    assert_eq!(x.declarations().next().unwrap().scope(), "::N::f@");

    assert!(session.index().get("N").is_none());
    assert_eq!(session.index().occurrence_count(), 3);
}

#[test]
fn test_reference_from_other_unit_carries_target_scope() {
    let mut session = IndexSession::c_family(IndexConfig::default());
    session.index_unit(&mut unit_a()).unwrap();
    let report = session.index_unit(&mut unit_b()).unwrap();
    assert_eq!(report.cursors, 7);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.discarded, 2);
    assert_eq!(report.adopted, 3);

    let f = session.index().get("f").unwrap();
    let refs: Vec<&Occurrence> = f.references().collect();
    assert_eq!(refs.len(), 2);
    assert_eq!(refs[0].role(), EntityRole::Reference);
    assert_eq!(refs[1].role(), EntityRole::Call);
    for r in refs {
        assert_eq!(r.scope(), "::g@");
        assert_eq!(r.ref_scope(), "::N::");
    }
}

#[test]
fn test_serial_output_lines() {
    let mut session = IndexSession::c_family(IndexConfig::default());
    session.index_unit(&mut unit_a()).unwrap();
    session.index_unit(&mut unit_b()).unwrap();

    assert_eq!(
        lines(&session),
        vec![
            "n.h,15,2,5,n.h,45,2,35,definition,function,int (int),f,::N::,",
            "b.cc,27,2,12,b.cc,28,2,13,reference,variable,int (int),f,::g@,::N::",
            "b.cc,27,2,12,b.cc,31,2,16,call,function,int,f,::g@,::N::",
            "n.h,21,2,11,n.h,26,2,16,declaration,variable,int,x,::N::f@,",
            "a.cc,16,2,5,a.cc,40,2,29,definition,function,int (),main,::,",
            "b.cc,16,2,6,b.cc,34,2,24,definition,function,void (),g,::,",
        ]
    );
}

#[test]
fn test_declaration_and_definition_are_kept_apart() {
    let mut session = IndexSession::c_family(IndexConfig::default());
    let proto = cursor(CursorKind::FUNCTION_DECL, "area", "shape.h", (40, 3, 5), 20)
        .with_usr("c:@F@area#")
        .with_type("int ()");
    let body = cursor(CursorKind::FUNCTION_DECL, "area", "shape.c", (10, 2, 5), 30)
        .as_definition()
        .with_usr("c:@F@area#")
        .with_type("int ()");

    assert_eq!(session.index_record(&body).unwrap(), Some(InsertOutcome::Adopted));
    assert_eq!(session.index_record(&proto).unwrap(), Some(InsertOutcome::Adopted));
    assert_eq!(session.index_record(&proto).unwrap(), Some(InsertOutcome::Discarded));

    let area = session.index().get("area").unwrap();
    assert_eq!(area.declarations().count(), 1);
    assert_eq!(area.definitions().count(), 1);
    let roles: Vec<EntityRole> = area.records().map(Occurrence::role).collect();
    assert_eq!(roles, vec![EntityRole::Declaration, EntityRole::Definition]);
}

#[test]
fn test_references_follow_location_order() {
    let mut session = IndexSession::c_family(IndexConfig::default());
    let sites = [("z.c", 90), ("a.c", 300), ("z.c", 4), ("a.c", 12)];
    for (file, offset) in sites {
        let r = cursor(CursorKind::TYPE_REF, "Point", file, (offset, 1, 1), 5)
            .with_parent(CursorKind::TRANSLATION_UNIT, file);
        session.index_record(&r).unwrap();
    }
    let point = session.index().get("Point").unwrap();
    let seen: Vec<(String, u32)> = point
        .references()
        .map(|o| (o.begin().file.to_string(), o.begin().offset))
        .collect();
    assert_eq!(
        seen,
        vec![
            ("a.c".to_string(), 13),
            ("a.c".to_string(), 301),
            ("z.c".to_string(), 5),
            ("z.c".to_string(), 91),
        ]
    );
}

#[test]
fn test_internal_linkage_scope() {
    let mut session = IndexSession::c_family(IndexConfig::default());
    let helper = cursor(CursorKind::FUNCTION_DECL, "helper", "util.c", (0, 1, 1), 10)
        .as_definition()
        .with_linkage(Linkage::Internal)
        .with_type("void ()");
    session.index_record(&helper).unwrap();
    let def = session.index().get("helper").unwrap().definitions().next().unwrap();
    assert_eq!(def.scope(), ">::");
}

#[test]
fn test_anonymous_aggregates_are_distinct_and_stable_per_site() {
    let mut session = IndexSession::c_family(IndexConfig::default());
    let first = cursor(CursorKind::STRUCT_DECL, "", "v.h", (10, 2, 1), 30);
    let second = cursor(CursorKind::UNION_DECL, "", "v.h", (60, 5, 1), 30);
    session.index_record(&first).unwrap();
    session.index_record(&second).unwrap();
    assert_eq!(session.index_record(&first).unwrap(), Some(InsertOutcome::Discarded));

    let names: Vec<&str> = session.index().names().collect();
    assert_eq!(names.len(), 2);
    assert_ne!(names[0], names[1]);
    assert!(names.iter().all(|n| n.starts_with("_anon_")));
    let anon = session.index().get(names[0]).unwrap();
    assert!(anon.records().all(Occurrence::is_anonymous));
}

#[test]
fn test_collision_aborts_by_default() {
    let mut session = IndexSession::c_family(IndexConfig::default());
    let mut unit = RecordedUnit::new(
        "list.c",
        vec![
            cursor(CursorKind::STRUCT_DECL, "node", "list.c", (0, 1, 1), 20),
            cursor(CursorKind::VAR_DECL, "node", "list.c", (30, 3, 1), 10).with_type("int"),
        ],
    );
    let err = session.index_unit(&mut unit).unwrap_err();
    assert!(matches!(
        err,
        XrefError::SpecifierCollision {
            bound: Specifier::Type,
            offered: Specifier::Value,
            ..
        }
    ));
}

#[test]
fn test_collision_report_keeps_indexing() {
    let config = IndexConfig {
        collisions: CollisionPolicy::Report,
        ..IndexConfig::default()
    };
    let mut session = IndexSession::c_family(config);
    let mut unit = RecordedUnit::new(
        "list.c",
        vec![
            cursor(CursorKind::STRUCT_DECL, "node", "list.c", (0, 1, 1), 20),
            cursor(CursorKind::VAR_DECL, "node", "list.c", (30, 3, 1), 10).with_type("int"),
            cursor(CursorKind::VAR_DECL, "head", "list.c", (50, 4, 1), 10).with_type("int"),
        ],
    );
    let report = session.index_unit(&mut unit).unwrap();
    assert_eq!(report.collisions, 1);
    assert_eq!(report.adopted, 2);
    assert_eq!(session.collisions().len(), 1);
    assert_eq!(session.index().get("node").unwrap().specifier(), Specifier::Type);
}

#[test]
fn test_macros_need_an_untyped_kind() {
    let convention = TableConvention::c_family().with_macros().unwrap();
    let expansion = cursor(CursorKind::MACRO_EXPANSION, "MAX", "m.c", (5, 1, 6), 3);

    let mut strict = IndexSession::new(IndexConfig::default(), std::sync::Arc::new(convention.clone()));
    assert!(matches!(
        strict.index_record(&expansion),
        Err(XrefError::Invalid(_))
    ));

    let config = IndexConfig::default().with_macros();
    let mut session = IndexSession::new(config, std::sync::Arc::new(convention));
    assert_eq!(session.index_record(&expansion).unwrap(), Some(InsertOutcome::Adopted));
    let max = session.index().get("MAX").unwrap();
    assert_eq!(max.specifier(), Specifier::Macro);
}

/// ```cpp
/// namespace app {
/// class Worker {
///     ~Worker() { int tmp; }
///     bool operator==(const Worker &rhs);
/// };
/// }
/// ```
#[test]
fn test_destructors_operators_and_type_refs_keep_the_session_alive() {
    let class = cursor(CursorKind::CLASS_DECL, "Worker", "w.h", (16, 2, 7), 80)
        .as_definition()
        .with_parent(CursorKind::NAMESPACE, "app");
    let dtor = cursor(CursorKind::DESTRUCTOR, "~Worker", "w.h", (35, 3, 5), 20)
        .as_definition()
        .with_type("void ()")
        .with_parent(CursorKind::CLASS_DECL, "Worker")
        .with_parent(CursorKind::NAMESPACE, "app");
    let tmp = cursor(CursorKind::VAR_DECL, "tmp", "w.h", (51, 3, 21), 3)
        .with_type("int")
        .with_parent(CursorKind::DESTRUCTOR, "~Worker")
        .with_parent(CursorKind::CLASS_DECL, "Worker")
        .with_parent(CursorKind::NAMESPACE, "app");
    let op = cursor(CursorKind::CXX_METHOD, "operator==", "w.h", (63, 4, 10), 34)
        .with_type("bool (const Worker &)")
        .with_parent(CursorKind::CLASS_DECL, "Worker")
        .with_parent(CursorKind::NAMESPACE, "app");
    let rhs = cursor(CursorKind::PARM_DECL, "rhs", "w.h", (74, 4, 21), 19)
        .with_type("const Worker &")
        .with_parent(CursorKind::CXX_METHOD, "operator==")
        .with_parent(CursorKind::CLASS_DECL, "Worker")
        .with_parent(CursorKind::NAMESPACE, "app");
    let type_ref = cursor(CursorKind::TYPE_REF, "class app::Worker", "w.h", (80, 4, 27), 6)
        .with_parent(CursorKind::CXX_METHOD, "operator==")
        .with_parent(CursorKind::CLASS_DECL, "Worker")
        .with_parent(CursorKind::NAMESPACE, "app")
        .with_referenced(class.clone());

    let mut session = IndexSession::c_family(IndexConfig::default());
    let mut unit = RecordedUnit::new("w.cc", vec![class, dtor, tmp, op, rhs, type_ref]);
    let report = session.index_unit(&mut unit).unwrap();
    assert_eq!(report.cursors, 6);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.adopted, 4);

    for local in ["tmp", "rhs"] {
        let decl = session.index().get(local).unwrap().declarations().next().unwrap();
        assert_eq!(decl.scope(), "::app::Worker::");
    }
    let worker = session.index().get("Worker").unwrap();
    assert_eq!(worker.definitions().count(), 1);
    let reference = worker.references().next().unwrap();
    assert_eq!(reference.scope(), "::app::Worker::");
    assert_eq!(reference.ref_scope(), "::app::");
    assert!(
        session
            .index()
            .names()
            .all(|name| !name.contains('~') && !name.starts_with("operator"))
    );
}

#[test]
fn test_scopes_always_match_grammar() {
    let mut session = IndexSession::c_family(IndexConfig::default());
    session.index_unit(&mut unit_a()).unwrap();
    session.index_unit(&mut unit_b()).unwrap();
    for occ in session.index().records() {
        assert!(xrefscope_core::validate::is_valid_scope(occ.scope()));
        assert!(xrefscope_core::validate::is_valid_ref_scope(occ.ref_scope()));
    }
}
