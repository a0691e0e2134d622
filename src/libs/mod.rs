pub mod synteny;
