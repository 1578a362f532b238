mod check;
mod parse;
mod scan;
mod watch;

pub(crate) use check::cmd_check;
pub(crate) use parse::cmd_parse;
pub(crate) use scan::cmd_scan;
pub(crate) use watch::cmd_watch;
