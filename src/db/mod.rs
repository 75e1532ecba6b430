pub mod pet_types;
