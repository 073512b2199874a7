#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Show,
    Hide,
    Select(usize),
    Step(isize),
    ConfigReload,
}
