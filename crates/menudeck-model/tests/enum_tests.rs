use menudeck_model::{ChangeAction, ChangeType, Channel, DeploymentStatus, Environment};
use proptest::prelude::*;

fn change_type() -> impl Strategy<Value = ChangeType> {
    prop_oneof![
        Just(ChangeType::Product),
        Just(ChangeType::Recipe),
        Just(ChangeType::Identifier),
        Just(ChangeType::Ingredient),
        Just(ChangeType::Coupon),
    ]
}

fn change_action() -> impl Strategy<Value = ChangeAction> {
    prop_oneof![
        Just(ChangeAction::Created),
        Just(ChangeAction::Updated),
        Just(ChangeAction::Deleted),
    ]
}

fn environment() -> impl Strategy<Value = Environment> {
    prop_oneof![Just(Environment::Sandbox), Just(Environment::Production)]
}

fn channel() -> impl Strategy<Value = Channel> {
    prop_oneof![
        Just(Channel::Delivery),
        Just(Channel::Takeaway),
        Just(Channel::Curbside),
    ]
}

fn deployment_status() -> impl Strategy<Value = DeploymentStatus> {
    prop_oneof![
        Just(DeploymentStatus::Pending),
        Just(DeploymentStatus::InProgress),
        Just(DeploymentStatus::Success),
        Just(DeploymentStatus::Failed),
    ]
}

/// Display text is also the serde wire name
fn wire_name<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_value(value).unwrap().as_str().unwrap().to_string()
}

proptest! {
    #[test]
    fn prop_display_parses_back(
        kind in change_type(),
        action in change_action(),
        env in environment(),
        ch in channel(),
    ) {
        prop_assert_eq!(kind.to_string().parse::<ChangeType>().unwrap(), kind);
        prop_assert_eq!(action.to_string().parse::<ChangeAction>().unwrap(), action);
        prop_assert_eq!(env.to_string().parse::<Environment>().unwrap(), env);
        prop_assert_eq!(ch.to_string().parse::<Channel>().unwrap(), ch);
    }

    #[test]
    fn prop_parse_ignores_case_and_padding(kind in change_type(), upper in any::<bool>()) {
        let text = if upper { kind.as_str().to_ascii_uppercase() } else { kind.as_str().to_string() };
        prop_assert_eq!(format!("  {text} ").parse::<ChangeType>().unwrap(), kind);
    }

    #[test]
    fn prop_display_matches_wire_name(
        kind in change_type(),
        action in change_action(),
        env in environment(),
        status in deployment_status(),
    ) {
        prop_assert_eq!(wire_name(&kind), kind.to_string());
        prop_assert_eq!(wire_name(&action), action.to_string());
        prop_assert_eq!(wire_name(&env), env.to_string());
        prop_assert_eq!(wire_name(&status), status.to_string());

        let back: DeploymentStatus = serde_json::from_value(serde_json::to_value(status).unwrap()).unwrap();
        prop_assert_eq!(back, status);
    }

    #[test]
    fn prop_unknown_words_name_their_kind(word in "[a-z]{3,12}") {
        prop_assume!(word.parse::<ChangeType>().is_err());
        let err = word.parse::<ChangeType>().unwrap_err();
        prop_assert_eq!(err.kind, "change type");
        prop_assert_eq!(err.value, word);
    }
}
