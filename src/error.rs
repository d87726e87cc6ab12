/*******************************************************************************
 *     ___                  _   ____  ____
 *    / _ \ _   _  ___  ___| |_|  _ \| __ )
 *   | | | | | | |/ _ \/ __| __| | | |  _ \
 *   | |_| | |_| |  __/\__ \ |_| |_| | |_) |
 *    \__\_\\__,_|\___||___/\__|____/|____/
 *
 *  Copyright (c) 2014-2019 Appsicle
 *  Copyright (c) 2019-2024 QuestDB
 *
 *  Licensed under the Apache License, Version 2.0 (the "License");
 *  you may not use this file except in compliance with the License.
 *  You may obtain a copy of the License at
 *
 *  http://www.apache.org/licenses/LICENSE-2.0
 *
 *  Unless required by applicable law or agreed to in writing, software
 *  distributed under the License is distributed on an "AS IS" BASIS,
 *  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *  See the License for the specific language governing permissions and
 *  limitations under the License.
 *
 ******************************************************************************/

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt::{Debug, Display, Formatter, Write};
use std::sync::Arc;

/// Cause of a delta decoding error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaErrorCause {
    /// A block header field is missing, overflows or is inconsistent.
    MalformedHeader,

    /// A miniblock declares more bits per value than the output integer has.
    InvalidBitWidth,

    /// The input ended before the declared values were read.
    UnexpectedEof,

    /// The prefix and suffix length streams hold a different number of values.
    PrefixSuffixLengthMismatch,

    /// A prefix, suffix or value length is negative.
    InvalidNegativeLength,

    /// A prefix is longer than the value it is shared with.
    PrefixLengthOutOfBounds,

    /// A value is longer than the bytes left in the page.
    ValueLengthOutOfBounds,

    /// A byte buffer can't be viewed as the requested integer type.
    Layout,
}

impl DeltaErrorCause {
    fn name(&self) -> &'static str {
        match self {
            Self::MalformedHeader => "malformed header",
            Self::InvalidBitWidth => "invalid bit width",
            Self::UnexpectedEof => "unexpected end of input",
            Self::PrefixSuffixLengthMismatch => "prefix and suffix length mismatch",
            Self::InvalidNegativeLength => "invalid negative length",
            Self::PrefixLengthOutOfBounds => "prefix length out of bounds",
            Self::ValueLengthOutOfBounds => "value length out of bounds",
            Self::Layout => "invalid layout",
        }
    }

    #[track_caller]
    pub fn into_err(self) -> DeltaError {
        DeltaError::new(self)
    }
}

impl Display for DeltaErrorCause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An error decoding a delta encoded page.
#[derive(Clone)]
pub struct DeltaError {
    /// What caused the error.
    cause: DeltaErrorCause,

    /// Initial message (if any) and
    /// stack of additional contextual information,
    /// printed in reverse order.
    context: Vec<String>,

    /// Root location of the error.
    backtrace: Arc<Backtrace>,
}

impl DeltaError {
    #[track_caller]
    pub fn new(cause: DeltaErrorCause) -> Self {
        Self {
            cause,
            context: Vec::new(),
            backtrace: Backtrace::capture().into(),
        }
    }

    #[track_caller]
    pub fn with_descr(cause: DeltaErrorCause, descr: impl Into<String>) -> Self {
        Self {
            cause,
            context: vec![descr.into()],
            backtrace: Backtrace::capture().into(),
        }
    }

    pub fn cause(&self) -> DeltaErrorCause {
        self.cause
    }

    pub fn add_context(&mut self, context: impl Into<String>) {
        self.context.push(context.into());
    }

    fn fmt_msg<W: Write>(&self, f: &mut W) -> std::fmt::Result {
        if self.context.is_empty() {
            return write!(f, "{}", self.cause);
        }
        // Print the context first in reverse order.
        let last_index = self.context.len() - 1;
        for (index, context) in self.context.iter().rev().enumerate() {
            if index == last_index {
                write!(f, "{}", context)?;
            } else {
                write!(f, "{}: ", context)?;
            }
        }
        Ok(())
    }

    pub fn display_with_backtrace(&self) -> String {
        let mut msg = String::new();
        let _ = self.fmt_msg(&mut msg);
        if self.backtrace.status() == BacktraceStatus::Captured {
            let _ = write!(msg, "\n{}", self.backtrace);
        }
        msg
    }
}

impl Debug for DeltaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "DeltaError\n    Cause: {:?}", self.cause)?;
        writeln!(f, "    Context:")?;
        for line in self.context.iter().rev() {
            writeln!(f, "        {}", line)?;
        }
        if self.backtrace.status() == BacktraceStatus::Captured {
            writeln!(f, "    Backtrace:\n{}", self.backtrace)?;
        }
        Ok(())
    }
}

impl Display for DeltaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.fmt_msg(f)
    }
}

impl std::error::Error for DeltaError {}

pub type DeltaResult<T> = Result<T, DeltaError>;

pub trait DeltaErrorExt<T> {
    fn context(self, context: &str) -> Self;
    fn with_context<F>(self, context: F) -> Self
    where
        F: FnOnce(&mut DeltaError) -> String;
}

impl<T> DeltaErrorExt<T> for DeltaResult<T> {
    fn context(self, context: &str) -> Self {
        match self {
            Ok(val) => Ok(val),
            Err(mut err) => {
                err.add_context(context);
                Err(err)
            }
        }
    }

    fn with_context<F>(self, context: F) -> Self
    where
        F: FnOnce(&mut DeltaError) -> String,
    {
        match self {
            Ok(val) => Ok(val),
            Err(mut err) => {
                let context = context(&mut err);
                err.add_context(context);
                Err(err)
            }
        }
    }
}

macro_rules! fmt_err {
    ($cause: ident, $($arg:tt)*) => {
        $crate::error::DeltaError::with_descr(
            $crate::error::DeltaErrorCause::$cause,
            format!($($arg)*))
    };
}

pub(crate) use fmt_err;
