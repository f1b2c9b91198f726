mod all;
mod footer;
mod header;
mod log;
mod login;
mod main;
mod task_detail;
mod task_form;
mod task_list;

use self::log::log;
use super::*;
use footer::footer;
use header::header;
use login::login;
use main::main;

pub use all::all as render;
