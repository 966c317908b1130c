mod common;

use std::sync::Arc;

use common::{catalog, FixedTokenGenerator};
use ruleforge::intent::Value;
use ruleforge::kernel::compiler::{compile, render_value};
use ruleforge::kernel::program::{Contact, DeviceDescriptor, Predicate, Program, Stage};
use ruleforge::kernel::schema::{FilterOp, FunctionSchema, Role};
use ruleforge::services::{FlowTokenGenerator, RandomTokenGenerator};
use ruleforge::DialogError;

fn schema(kind: &str, name: &str) -> Arc<FunctionSchema> {
    let function = catalog()
        .functions
        .into_iter()
        .find(|f| f.kind == kind && f.name == name)
        .unwrap();
    Arc::new(function)
}

fn device(kind: &str, id: &str) -> DeviceDescriptor {
    DeviceDescriptor {
        kind: kind.to_string(),
        id: id.to_string(),
        display_label: id.to_string(),
    }
}

fn local(role: Role, kind: &str, name: &str, id: &str) -> Stage {
    let mut stage = Stage::new(role, schema(kind, name));
    stage.device = Some(device(kind, id));
    stage
}

#[test]
fn test_empty_program_does_not_compile() {
    let result = compile(&Program::default(), &FixedTokenGenerator);
    assert!(matches!(result, Err(DialogError::IncompleteProgram(_))));
}

#[test]
fn test_unresolved_stage_does_not_compile() {
    let mut program = Program::default();
    program.push(Stage::new(Role::Action, schema("twitter", "sink")));
    assert!(matches!(
        compile(&program, &FixedTokenGenerator),
        Err(DialogError::IncompleteProgram(_))
    ));

    // Device bound but the status slot is still open.
    program.action.as_mut().unwrap().device = Some(device("twitter", "twitter-foo"));
    assert!(matches!(
        compile(&program, &FixedTokenGenerator),
        Err(DialogError::IncompleteProgram(_))
    ));
}

#[test]
fn test_trigger_with_filters_and_action() {
    let mut trigger = local(Role::Trigger, "twitter", "source", "twitter-foo");
    trigger.filters.push(Predicate {
        field: "hashtags".to_string(),
        op: FilterOp::Contains,
        value: Value::String("rust".to_string()),
    });
    trigger.filters.push(Predicate {
        field: "from".to_string(),
        op: FilterOp::Is,
        value: Value::String("bob".to_string()),
    });
    let mut action = local(Role::Action, "facebook", "post", "facebook-7");
    action.bind("status", Value::VarRef("text".to_string()));

    let mut program = Program::default();
    program.push(action);
    program.push(trigger);

    let compiled = compile(&program, &FixedTokenGenerator).unwrap();
    assert_eq!(
        compiled.code,
        r#"AlmondGenerated() {
    @(type="twitter",id="twitter-foo").source() , hashtags =~ "rust" , from = "bob" , v_text := text, v_hashtags := hashtags, v_urls := urls, v_from := from, v_in_reply_to := in_reply_to => @(type="facebook",id="facebook-7").post(status=v_text) ;
}"#
    );
    assert!(compiled.remote.is_none());
}

#[test]
fn test_arguments_follow_declaration_order() {
    let mut action = local(Role::Action, "twitter", "post_picture", "twitter-bar");
    action.bind("picture_url", Value::String("http://example.com/a.png".to_string()));
    action.bind("caption", Value::String("look".to_string()));

    let mut program = Program::default();
    program.push(action);

    let compiled = compile(&program, &FixedTokenGenerator).unwrap();
    assert_eq!(
        compiled.code,
        r#"AlmondGenerated() {
    now => @(type="twitter",id="twitter-bar").post_picture(caption="look", picture_url="http://example.com/a.png") ;
}"#
    );
}

#[test]
fn test_remote_stage_addressing() {
    let mut query = Stage::new(Role::Query, schema("xkcd", "get_comic"));
    query.remote = Some(Contact {
        principal: "mock-account:MOCK1234-phone:+1800666".to_string(),
        display_name: "Mom Corp Inc.".to_string(),
    });
    let mut program = Program::default();
    program.push(query);

    let compiled = compile(&program, &FixedTokenGenerator).unwrap();
    let remote = compiled.remote.expect("remote addressing");
    assert_eq!(remote.kind_channel, "query:xkcd:get_comic");
    assert_eq!(remote.token, common::TOKEN);
    assert!(compiled.code.contains("@remote.receive(__principal=\"mock-account:MOCK1234-phone:+1800666\"^^tt:contact(\"Mom Corp Inc.\")"));
    assert!(!compiled.code.contains("now =>"), "the remote stage is the entry point");
}

#[test]
fn test_value_rendering() {
    assert_eq!(render_value(&Value::Number(3.0)), "3");
    assert_eq!(render_value(&Value::Number(2.5)), "2.5");
    assert_eq!(render_value(&Value::Boolean(true)), "true");
    assert_eq!(render_value(&Value::String("say \"hi\"".to_string())), r#""say \"hi\"""#);
    assert_eq!(render_value(&Value::VarRef("title".to_string())), "v_title");
}

#[test]
fn test_reference_without_source_does_not_compile() {
    let mut action = local(Role::Action, "facebook", "post", "facebook-7");
    action.bind("status", Value::VarRef("text".to_string()));
    let mut program = Program::default();
    program.push(action.clone());
    assert!(matches!(
        compile(&program, &FixedTokenGenerator),
        Err(DialogError::IncompleteProgram(_))
    ));

    // "$event" needs something earlier to describe.
    action.bind("status", Value::Event);
    program.push(action.clone());
    assert!(matches!(
        compile(&program, &FixedTokenGenerator),
        Err(DialogError::IncompleteProgram(_))
    ));

    program.push(local(Role::Trigger, "security-camera", "new_event", "security-camera-1"));
    let compiled = compile(&program, &FixedTokenGenerator).unwrap();
    assert!(compiled.code.contains(".post(status=$event) ;"), "got {}", compiled.code);
}

#[test]
fn test_local_compile_is_deterministic() {
    let mut query = local(Role::Query, "xkcd", "get_comic", "xkcd-6");
    query.filters.push(Predicate {
        field: "number".to_string(),
        op: FilterOp::Greater,
        value: Value::Number(100.0),
    });
    let mut action = local(Role::Action, "twitter", "sink", "twitter-foo");
    action.bind("status", Value::VarRef("title".to_string()));
    let mut program = Program::default();
    program.push(query);
    program.push(action);

    let first = compile(&program, &RandomTokenGenerator).unwrap();
    let second = compile(&program, &RandomTokenGenerator).unwrap();
    assert_eq!(first, second);
    assert!(first.remote.is_none());
}

#[test]
fn test_flow_tokens_are_fresh_hex() {
    let is_hex = |token: &str| !token.is_empty() && token.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'));

    let token = RandomTokenGenerator.generate();
    assert!(is_hex(&token), "token {:?}", token);
    assert_ne!(token, RandomTokenGenerator.generate());

    let mut query = Stage::new(Role::Query, schema("xkcd", "get_comic"));
    query.remote = Some(Contact {
        principal: "mock-account:MOCK1234-phone:+1800666".to_string(),
        display_name: "Mom Corp Inc.".to_string(),
    });
    let mut program = Program::default();
    program.push(query);

    let first = compile(&program, &RandomTokenGenerator).unwrap().remote.unwrap();
    let second = compile(&program, &RandomTokenGenerator).unwrap().remote.unwrap();
    assert!(is_hex(&first.token) && is_hex(&second.token));
    assert_ne!(first.token, second.token, "every compilation draws a new token");
}
