//! Bus activity statistics.
//!
//! This module counts traffic through the parallel cable and the userport. It provides:
//! 1. **Host accesses:** Reads and writes issued by the host CPU, and how many of them
//!    found no drive enabled.
//! 2. **Synchronization:** How often catch-up ran and how many domain advances it caused.
//! 3. **Port dispatch:** Reads on which two devices drove conflicting levels.

/// Counters for one session.
///
/// Counters only increase; [`reset`](Self::reset) is the one way to clear them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BusStats {
    /// Host reads of the parallel cable.
    pub host_reads: u64,
    /// Host writes to the parallel cable (including ignored ones).
    pub host_writes: u64,
    /// Host accesses that found no enabled drive.
    pub idle_accesses: u64,
    /// Catch-up passes that ran (at least one drive enabled).
    pub catch_ups: u64,
    /// Individual domain advances across all catch-up passes.
    pub domains_advanced: u64,
    /// Userport reads on which device outputs collided.
    pub read_collisions: u64,
}

impl BusStats {
    /// Clears every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Prints the selected sections to stdout.
    ///
    /// Valid section names are `"summary"`, `"sync"` and `"port"`; an empty slice prints
    /// everything.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let accesses = self.host_reads + self.host_writes;

        if want("summary") {
            println!("\n==========================================================");
            println!("BUS ACTIVITY STATISTICS");
            println!("==========================================================");
            println!("host_reads               {}", self.host_reads);
            println!("host_writes              {}", self.host_writes);
            println!(
                "idle_accesses            {} ({:.2}%)",
                self.idle_accesses,
                percent(self.idle_accesses, accesses)
            );
            println!("----------------------------------------------------------");
        }
        if want("sync") {
            println!("SYNCHRONIZATION");
            println!("  catch_ups              {}", self.catch_ups);
            println!("  domains_advanced       {}", self.domains_advanced);
            println!("----------------------------------------------------------");
        }
        if want("port") {
            println!("USERPORT");
            println!("  read_collisions        {}", self.read_collisions);
            println!("==========================================================");
        }
    }

    /// Prints every section.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
