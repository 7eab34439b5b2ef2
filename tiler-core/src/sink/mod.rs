//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod filesink;
pub mod sink;


pub use self::filesink::Filesink;
pub use self::sink::{world_file, DummySink, Nosink, TileSink, TilesetMetadata};
