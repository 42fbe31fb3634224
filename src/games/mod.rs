pub mod anagrams;
