// Copyright 2021 Datafuse Labs
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

/// Trait for some value with a version number.
pub trait SeqValue<V = Vec<u8>> {
    /// Return the version of the value.
    fn seq(&self) -> u64;

    /// Return the reference of the value.
    fn value(&self) -> &V;

    /// Consume the value and return the value.
    fn into_value(self) -> V;

    /// Consume self and return the version and the value.
    fn unpack(self) -> (u64, V)
    where Self: Sized {
        (self.seq(), self.into_value())
    }
}
