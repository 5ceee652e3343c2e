use std::time::SystemTime;

// Source of the current wall-clock time
pub trait GetTime {
    fn get_now(&self) -> SystemTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Clock {}

impl Clock {
    pub fn new() -> Self {
        Clock {}
    }
}

impl GetTime for Clock {
    fn get_now(&self) -> SystemTime {
        SystemTime::now()
    }
}
