use crate::{
    config::{Config, ConfigManager},
    core::services::{
        FilterAggregator, LocationResolver, NoPlaces, PresenceService, SelectionListController,
    },
    core::FilterHub,
    domain::SharedLocation,
    navigation::Navigator,
};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub hub: FilterHub,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub navigator: Navigator,
    /// Controller behind the category screen on top of the stack.
    pub list: Option<SelectionListController>,
    pub aggregator: FilterAggregator,
    pub presence: PresenceService,
    pub locations: LocationResolver<NoPlaces>,
    pub shared_location: Option<SharedLocation>,
}
