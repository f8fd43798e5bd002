//! Template cloning seen through the provisioner

use provision_core::prototype::{PrototypeStore, Section};
use provision_core::{ErrorKind, ProvisionError, REPORT_TEMPLATE};
use provision_test_utils::{sample_document, sample_user, setup_provisioner};

#[test]
fn two_clones_equal_but_independent() {
    let store = PrototypeStore::new();
    store.register("notes", sample_document()).unwrap();

    let mut a = store.clone_template("notes").unwrap();
    let b = store.clone_template("notes").unwrap();
    assert_eq!(a, b);

    a.sections_mut().push(Section::new("Appendix", ""));
    a.sections_mut()[0].body.clear();
    a.tags_mut().clear();

    assert_ne!(a, b);
    assert_eq!(b, sample_document().with_created_at(b.created_at()));
    assert_eq!(store.clone_template("notes").unwrap(), b);
}

#[test]
fn permission_lists_are_not_shared() {
    let store = PrototypeStore::new();
    store.register("editor", sample_user()).unwrap();

    let mut first = store.clone_template("editor").unwrap();
    let second = store.clone_template("editor").unwrap();
    first.grant("publish");
    assert!(first.revoke("read"));

    assert_eq!(second.permissions(), ["read", "write"]);
    assert_eq!(store.clone_template("editor").unwrap().permissions(), ["read", "write"]);
}

#[test]
fn builtin_templates_reject_reregistration() {
    let provisioner = setup_provisioner();
    let err: ProvisionError = provisioner
        .documents()
        .register(REPORT_TEMPLATE, sample_document())
        .unwrap_err()
        .into();
    assert_eq!(err.kind(), ErrorKind::DuplicateTemplateName);
    assert_eq!(
        provisioner.documents().clone_template(REPORT_TEMPLATE).unwrap().title(),
        "Quarterly Report"
    );
}

#[test]
fn unknown_template() {
    let provisioner = setup_provisioner();
    let err: ProvisionError = provisioner.users().clone_template("root").unwrap_err().into();
    assert_eq!(err.kind(), ErrorKind::UnknownTemplateName);
}
