use super::error::DialogError;
use super::event::{AskKind, Outbox};
use super::program::Program;
use super::schema::{spoken, FunctionSchema, Role};
use crate::intent::{FunctionRef, Special, WireIntent};
use crate::outputs::realizer;

/// Browse categories, as (button title, category id).
pub const CATEGORIES: &[(&str, &str)] = &[
    ("Media", "media"),
    ("Social Networks", "social-network"),
    ("Home", "home"),
    ("Communication", "communication"),
    ("Health and Fitness", "health"),
    ("Services", "service"),
    ("Data Management", "data-management"),
];

const ROLES: [Role; 3] = [Role::Trigger, Role::Query, Role::Action];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Pick(Role),
    AddFilter,
    Run,
}

/// The "make a rule" menu: one slot per role, then filters and run.
pub struct RuleBuilder;

impl RuleBuilder {
    pub fn prompt_menu(program: &Program, out: &mut Outbox) {
        if program.is_empty() {
            out.send("Click on one of the following buttons to start adding command.");
            out.ask(AskKind::Generic);
            out.choices(ROLES.iter().map(|r| r.menu_title()));
            return;
        }

        out.send("Add more commands and filters or run your command if you are ready.");
        out.ask(AskKind::Generic);
        let slots = ROLES.iter().map(|role| {
            let stage = match role {
                Role::Trigger => program.trigger.as_ref(),
                Role::Query => program.queries.first(),
                Role::Action => program.action.as_ref(),
            };
            match stage {
                Some(stage) => realizer::menu_label(stage),
                None => role.menu_title().to_string(),
            }
        });
        out.choices(slots.chain(["Add a filter".to_string(), "Run it".to_string()]));
    }

    pub fn menu_choice(program: &Program, index: usize) -> Result<MenuChoice, DialogError> {
        let options = if program.is_empty() { 3 } else { 5 };
        match index {
            0..=2 => Ok(MenuChoice::Pick(ROLES[index])),
            3 if options == 5 => Ok(MenuChoice::AddFilter),
            4 if options == 5 => Ok(MenuChoice::Run),
            _ => Err(DialogError::MalformedIntent(format!(
                "choice {} out of range for {} option(s)",
                index, options
            ))),
        }
    }

    pub fn prompt_categories(role: Role, out: &mut Outbox) {
        out.ask(AskKind::Command);
        out.send("Pick one from the following categories or simply type in.");
        if role == Role::Trigger {
            out.button("Do it now", WireIntent::special(&Special::Empty).to_json());
        }
        for (title, id) in CATEGORIES {
            out.button(*title, WireIntent::help_category(id).to_json());
        }
        out.button("Back", WireIntent::special(&Special::Back).to_json());
    }

    /// Buttons for the functions of `role` in a category.
    pub fn prompt_functions(role: Role, functions: &[FunctionSchema], out: &mut Outbox) {
        out.ask(AskKind::Command);
        let matching: Vec<&FunctionSchema> = functions.iter().filter(|f| f.role == role).collect();
        if matching.is_empty() {
            out.send("There is nothing of that kind in this category.");
        } else {
            out.send("Pick a command below.");
        }
        for function in matching {
            let fref = FunctionRef::new(&function.kind, &function.name);
            out.button(
                format!("{} on {}", function.canonical, spoken(&function.kind)),
                WireIntent::invocation(role, &fref).to_json(),
            );
        }
        out.button("Back", WireIntent::special(&Special::Back).to_json());
    }
}
