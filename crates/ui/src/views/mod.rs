mod home;
mod task;

pub use home::HomeView;
pub use task::TaskView;

#[cfg(test)]
pub(crate) use home::HomeTestHandles;

#[cfg(test)]
pub(crate) mod test_harness;

#[cfg(test)]
mod view_smoke;
