// Aliyun OSS Rust Library for Object Storage Service
// Copyright 2022 MinIO, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Time source used to stamp the `Date` header on outgoing requests.

use crate::oss::utils::{UtcTime, utc_now};
use std::fmt::Debug;

pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> UtcTime;
}

/// Reads the system wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> UtcTime {
        utc_now()
    }
}

/// Always returns the same instant. Useful for reproducible signatures in tests.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub UtcTime);

impl Clock for FixedClock {
    fn now(&self) -> UtcTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_fixed_clock() {
        let t = Utc.with_ymd_and_hms(2015, 10, 21, 15, 56, 35).unwrap();
        let clock: Box<dyn Clock> = Box::new(FixedClock(t));
        assert_eq!(clock.now(), t);
        assert_eq!(clock.now(), clock.now());
    }
}
