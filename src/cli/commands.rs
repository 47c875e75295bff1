use std::path::Path;

use crate::catalog;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::output::{self, section as output_section, OutputPreferences};
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::core::services::PersistPolicy;
use crate::core::FilterHub;
use crate::domain::{FilterCategory, Hunger, OnlineStatus, SelectionEntry};
use crate::navigation::{Screen, Transition};
use crate::utils::build_info;

pub fn register_all(registry: &mut CommandRegistry) {
    for entry in definitions() {
        registry.register(entry);
    }
}

fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("help", "Show available commands", "help [command]", cmd_help),
        CommandEntry::new("version", "Show build information", "version", cmd_version),
        CommandEntry::new(
            "categories",
            "List filter categories and how many items are selected",
            "categories",
            cmd_categories,
        ),
        CommandEntry::new(
            "open",
            "Open the checkable list for a category",
            "open <dishes|ingredients|allergens|locations|meal-times>",
            cmd_open,
        ),
        CommandEntry::new(
            "search",
            "Filter the open list; no query shows everything",
            "search [query]",
            cmd_search,
        ),
        CommandEntry::new("list", "Show the open list", "list", cmd_list),
        CommandEntry::new(
            "toggle",
            "Check or uncheck an item in the open list",
            "toggle <name>",
            cmd_toggle,
        ),
        CommandEntry::new("clear", "Uncheck every item in the open list", "clear", cmd_clear),
        CommandEntry::new(
            "done",
            "Save the open list and return to the filters",
            "done",
            cmd_done,
        ),
        CommandEntry::new(
            "back",
            "Close the open list without saving",
            "back",
            cmd_back,
        ),
        CommandEntry::new("filters", "Show active filters", "filters", cmd_filters),
        CommandEntry::new(
            "remove",
            "Remove one active filter",
            "remove <category> <name>",
            cmd_remove,
        ),
        CommandEntry::new(
            "clear-filters",
            "Remove every active filter",
            "clear-filters",
            cmd_clear_filters,
        ),
        CommandEntry::new(
            "hunger",
            "Show or set your hunger state",
            "hunger [hungry|full]",
            cmd_hunger,
        ),
        CommandEntry::new(
            "status",
            "Show or set your online status",
            "status [online|dnd|offline]",
            cmd_status,
        ),
        CommandEntry::new(
            "location",
            "Share a location by coordinates",
            "location <latitude> <longitude> [description]",
            cmd_location,
        ),
        CommandEntry::new(
            "config",
            "Show or change preferences",
            "config [policy <deferred|immediate> | color <on|off> | confirm <on|off>]",
            cmd_config,
        ),
        CommandEntry::new(
            "build-catalogs",
            "Rebuild catalog fixtures from a scraped dishes file",
            "build-catalogs <dishes.json> <output-dir>",
            cmd_build_catalogs,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first() {
        Some(name) => {
            let entry = context.registry.get(&name.to_lowercase()).ok_or_else(|| {
                CommandError::InvalidArguments(format!("No help available for `{}`.", name))
            })?;
            help::print_command(entry);
        }
        None => help::print_overview(&context.registry),
    }
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    io::print_info(build_info::current().summary());
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output_section("Filter categories");
    let store = context.hub.selection_store();
    for category in FilterCategory::ALL {
        let total = context.hub.catalogs().get(category).len();
        let selected = store
            .load(category)
            .ok()
            .flatten()
            .map(|map| map.values().filter(|checked| **checked).count())
            .unwrap_or(0);
        io::print_info(format!(
            "  {:<12} {:<12} {} items, {} selected",
            category.slug(),
            category.label(),
            total,
            selected
        ));
    }
    Ok(())
}

fn cmd_open(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: open <category>".into()))?;
    let category: FilterCategory = raw.parse()?;

    if let Some(open) = context.list.as_ref() {
        return Err(CommandError::InvalidArguments(format!(
            "{} is already open. Use `done` or `back` first.",
            open.category().label()
        )));
    }

    context.ensure_filter_hub();
    context.navigator.present(Screen::FilterCategory(category));
    let controller = context.hub.open(category);
    output_section(category.label());
    io::print_info(format!("Search: {}", category.search_placeholder()));
    render_entries(&controller.filtered_items());
    context.list = Some(controller);
    Ok(())
}

fn cmd_search(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let list = context.list_mut()?;
    list.set_query(args.join(" "));
    let visible = list.filtered_items();
    if visible.is_empty() {
        io::print_warning(format!("Nothing matches `{}`.", list.query()));
    } else {
        render_entries(&visible);
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let list = context.list_mut()?;
    output_section(list.category().label());
    if !list.query().is_empty() {
        io::print_info(format!("Search: {}", list.query()));
    }
    render_entries(&list.filtered_items());
    io::print_info(format!("{} selected", list.selected_count()));
    Ok(())
}

fn cmd_toggle(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: toggle <name>".into()));
    }
    let name = args.join(" ");
    let list = context.list_mut()?;
    match list.toggle(&name) {
        Some(true) => io::print_success(format!("Checked {}.", name)),
        Some(false) => io::print_info(format!("Unchecked {}.", name)),
        None => {
            let hint = list
                .suggest(&name)
                .map(|best| format!(" Did you mean `{}`?", best))
                .unwrap_or_default();
            return Err(CommandError::InvalidArguments(format!(
                "`{}` is not in {}.{}",
                name,
                list.category().label(),
                hint
            )));
        }
    }
    Ok(())
}

fn cmd_clear(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let label = context.list_mut()?.category().label();
    if !context.confirm_destructive(&format!("Uncheck every item in {}?", label))? {
        io::print_info("Nothing changed.");
        return Ok(());
    }
    let list = context.list_mut()?;
    list.clear_all();
    io::print_success(format!("Unchecked every item in {}.", label));
    Ok(())
}

fn cmd_done(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let list = context.list_mut()?;
    list.save()?;
    let label = list.category().label();
    let selected = list.selected_count();
    close_list(context);
    io::print_success(format!("Saved {} ({} selected).", label, selected));
    render_active_filters(context);
    Ok(())
}

fn cmd_back(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let list = context.list_mut()?;
    let label = list.category().label();
    let policy = list.policy();
    close_list(context);
    match policy {
        PersistPolicy::Deferred => io::print_info(format!("Closed {} without saving.", label)),
        PersistPolicy::Immediate => io::print_info(format!("Closed {}.", label)),
    }
    Ok(())
}

fn cmd_filters(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.ensure_filter_hub();
    context.aggregator.load_active();
    render_active_filters(context);
    Ok(())
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 2 {
        return Err(CommandError::InvalidArguments(
            "usage: remove <category> <name>".into(),
        ));
    }
    let category: FilterCategory = args[0].parse()?;
    let name = args[1..].join(" ");

    context.aggregator.load_active();
    let active = context
        .aggregator
        .sections()
        .iter()
        .any(|section| section.category == category && section.names().contains(&name.as_str()));
    if !active {
        return Err(CommandError::InvalidArguments(format!(
            "`{}` is not an active {} filter.",
            name,
            category.label()
        )));
    }

    context.aggregator.remove_item(category, &name)?;
    reload_open_list(context, Some(category));
    io::print_success(format!("Removed {} from {}.", name, category.label()));
    Ok(())
}

fn cmd_clear_filters(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.confirm_destructive("Remove every active filter?")? {
        io::print_info("Nothing changed.");
        return Ok(());
    }
    context.aggregator.clear_all()?;
    reload_open_list(context, None);
    io::print_success("Cleared all filters.");
    Ok(())
}

fn cmd_hunger(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(raw) = args.first() {
        let hunger: Hunger = raw.parse()?;
        context.presence.set_hunger(hunger)?;
    }
    io::print_info(context.presence.header_line());
    Ok(())
}

fn cmd_status(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first() {
        Some(raw) => {
            let status: OnlineStatus = args.join(" ").parse().map_err(|_| {
                CommandError::InvalidArguments(format!(
                    "Unknown status `{}`. Choose online, dnd, or offline.",
                    raw
                ))
            })?;
            context.presence.set_status(status)?;
            io::print_info(context.presence.header_line());
        }
        None => {
            let current = context.presence.current().status;
            output_section("Status");
            for option in OnlineStatus::ALL {
                let marker = if option == current { "*" } else { " " };
                io::print_info(format!("  {} {}", marker, option.option_label()));
            }
        }
    }
    Ok(())
}

fn cmd_location(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 2 {
        return Err(CommandError::InvalidArguments(
            "usage: location <latitude> <longitude> [description]".into(),
        ));
    }
    let latitude = parse_coordinate(args[0], "latitude", 90.0)?;
    let longitude = parse_coordinate(args[1], "longitude", 180.0)?;
    let description = (args.len() > 2).then(|| args[2..].join(" "));

    context.navigator.present(Screen::LocationSearch);
    let shared = context
        .locations
        .resolve(latitude, longitude, description.as_deref());
    context.navigator.dismiss();
    io::print_success(format!("Sharing location: {}", shared.description));
    context.shared_location = Some(shared);
    Ok(())
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            output_section("Preferences");
            io::print_info(format!("  file     {}", context.config_manager.path().display()));
            io::print_info(format!("  policy   {:?}", context.config.persist_policy));
            io::print_info(format!("  color    {}", on_off(context.config.ui_color_enabled)));
            io::print_info(format!("  confirm  {}", on_off(context.config.confirm_destructive)));
            Ok(())
        }
        [key, value] => {
            let mut updated = context.config.clone();
            match key.to_lowercase().as_str() {
                "policy" => {
                    updated.persist_policy = match value.to_lowercase().as_str() {
                        "deferred" => PersistPolicy::Deferred,
                        "immediate" => PersistPolicy::Immediate,
                        other => {
                            return Err(CommandError::InvalidArguments(format!(
                                "Unknown policy `{}`. Choose deferred or immediate.",
                                other
                            )))
                        }
                    };
                    if context.list.is_some() {
                        return Err(CommandError::InvalidArguments(
                            "Close the open list before changing the policy.".into(),
                        ));
                    }
                }
                "color" => updated.ui_color_enabled = parse_switch(value)?,
                "confirm" => updated.confirm_destructive = parse_switch(value)?,
                other => {
                    return Err(CommandError::InvalidArguments(format!(
                        "Unknown preference `{}`.",
                        other
                    )))
                }
            }
            context.config_manager.save(&updated)?;
            if updated.persist_policy != context.config.persist_policy {
                context.hub = FilterHub::from_config(context.config_manager.base_dir(), &updated)?;
            }
            output::set_preferences(OutputPreferences::with_color(updated.ui_color_enabled));
            context.config = updated;
            io::print_success("Preferences saved.");
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: config [policy|color|confirm <value>]".into(),
        )),
    }
}

fn cmd_build_catalogs(_context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [source, output_dir] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: build-catalogs <dishes.json> <output-dir>".into(),
        ));
    };
    let dishes = catalog::load_dishes(Path::new(source))?;
    let set = catalog::build_catalogs(&dishes);
    let written = catalog::write_catalogs(&set, Path::new(output_dir))?;
    for catalog in set.iter() {
        io::print_info(format!("  {:<12} {} items", catalog.category().slug(), catalog.len()));
    }
    io::print_success(format!(
        "Wrote {} catalog files from {} dishes to {}.",
        written.len(),
        dishes.len(),
        output_dir
    ));
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

/// Drops the open controller and pops its screen, refreshing the summary
/// the revealed hub shows.
fn close_list(context: &mut ShellContext) {
    context.list = None;
    if let Transition::Dismissed {
        revealed: Screen::FilterHub,
        ..
    } = context.navigator.dismiss()
    {
        context.aggregator.load_active();
    }
}

fn reload_open_list(context: &mut ShellContext, category: Option<FilterCategory>) {
    if let Some(list) = context.list.as_mut() {
        if category.map_or(true, |category| category == list.category()) {
            list.load();
        }
    }
}

fn render_entries(entries: &[&SelectionEntry]) {
    for entry in entries {
        let marker = if entry.checked { "[x]" } else { "[ ]" };
        io::print_info(format!("  {} {}", marker, entry.display_label()));
    }
}

fn render_active_filters(context: &ShellContext) {
    output_section("Active filters");
    if context.aggregator.is_empty() {
        io::print_info("No active filters.");
        return;
    }
    for section in context.aggregator.sections() {
        io::print_info(format!("{}:", section.title));
        for name in section.names() {
            io::print_info(format!("  - {}", name));
        }
    }
    io::print_info(format!("{} active", context.aggregator.total_active()));
}

fn parse_coordinate(raw: &str, label: &str, limit: f64) -> Result<f64, CommandError> {
    let value: f64 = raw
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("Invalid {}: `{}`.", label, raw)))?;
    if !value.is_finite() || value.abs() > limit {
        return Err(CommandError::InvalidArguments(format!(
            "{} must be between -{} and {}.",
            label, limit, limit
        )));
    }
    Ok(value)
}

fn parse_switch(raw: &str) -> Result<bool, CommandError> {
    match raw.to_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        other => Err(CommandError::InvalidArguments(format!(
            "Expected on or off, got `{}`.",
            other
        ))),
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}
