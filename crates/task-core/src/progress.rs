/// Progress reporting hooks the host passes into long-running calls
pub trait ProgressMonitor {
    fn begin_task(&mut self, name: &str, total_work: u32);

    fn sub_task(&mut self, name: &str);

    fn worked(&mut self, work: u32);

    fn done(&mut self);

    fn is_canceled(&self) -> bool {
        false
    }
}

/// A monitor that ignores all progress
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgressMonitor;

impl ProgressMonitor for NullProgressMonitor {
    fn begin_task(&mut self, _name: &str, _total_work: u32) {}

    fn sub_task(&mut self, _name: &str) {}

    fn worked(&mut self, _work: u32) {}

    fn done(&mut self) {}
}
