//! Properties that must hold for every input, valid or not.

use access::{Permissions, Resolver, Role, Section, SectionSet, can_access_section, has_access};
use proptest::prelude::*;

fn section() -> impl Strategy<Value = Section> {
    prop::sample::select(Section::ALL.to_vec())
}

fn role() -> impl Strategy<Value = Role> {
    prop::sample::select(Role::ALL.to_vec())
}

/// Flip the case of each ASCII letter according to the mask.
fn recase(name: &str, mask: &[bool]) -> String {
    name.chars()
        .zip(mask.iter().cycle())
        .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
        .collect()
}

#[test]
fn every_role_covers_every_section() {
    for role in Role::ALL {
        let perms = Resolver::default().resolve_capabilities(Some(role.as_str()));
        assert_eq!(perms, *role.permissions());
        for section in Section::ALL {
            assert_eq!(perms.get(section), role.permissions().get(section), "{role}/{section}");
        }
    }
}

#[test]
fn core_sections_are_total_too() {
    let resolver = Resolver::new(SectionSet::Core);
    for role in Role::ALL {
        let perms = resolver.resolve_capabilities(Some(role.as_str()));
        for section in SectionSet::Core.sections() {
            assert_eq!(perms.get(*section), role.permissions().get(*section));
        }
    }
}

proptest! {
    #[test]
    fn arbitrary_strings_never_panic(raw in any::<String>(), section in section()) {
        let granted = has_access(Some(raw.as_str()), section);
        if Role::normalize(&raw).is_none() {
            prop_assert!(!granted);
        }
    }

    #[test]
    fn arbitrary_section_keys_never_panic(raw_role in any::<String>(), key in any::<String>()) {
        let decision = Resolver::default().check(Some(raw_role.as_str()), &key);
        if key.parse::<Section>().is_err() {
            prop_assert!(!decision.is_allowed());
        }
    }

    #[test]
    fn role_case_does_not_matter(
        role in role(),
        mask in prop::collection::vec(any::<bool>(), 1..8),
        section in section(),
    ) {
        let recased = recase(role.as_str(), &mask);
        prop_assert_eq!(
            has_access(Some(recased.as_str()), section),
            has_access(Some(role.as_str()), section)
        );
    }

    #[test]
    fn alias_agrees_with_has_access(raw in "[a-zA-Z-]{0,10}", section in section()) {
        prop_assert_eq!(
            has_access(Some(raw.as_str()), section),
            can_access_section(Some(raw.as_str()), section)
        );
        prop_assert_eq!(has_access(None, section), can_access_section(None, section));
    }

    #[test]
    fn repeated_lookups_are_identical(raw in "[a-zA-Z]{0,8}") {
        let resolver = Resolver::default();
        let first = resolver.resolve_capabilities(Some(raw.as_str()));
        for _ in 0..3 {
            prop_assert_eq!(resolver.resolve_capabilities(Some(raw.as_str())), first);
        }
    }

    #[test]
    fn unknown_roles_get_nothing(raw in "[a-z]{1,12}") {
        prop_assume!(Role::normalize(&raw).is_none());
        prop_assert_eq!(
            Resolver::default().resolve_capabilities(Some(raw.as_str())),
            Permissions::NONE
        );
    }
}
