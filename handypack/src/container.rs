//! Collections are written as a `u32` element count followed by every element in the source's iteration order; maps
//! write key then value for each entry. Decoding reads the count and inserts that many decoded elements into a fresh
//! collection which then replaces the destination, so the final iteration order of sets and maps is whatever the
//! destination type's own ordering or hashing dictates.

use crate::error::{DecodeError, EncodeError};
use crate::pack::{capacity, dump_len, load_len, Dump, Load, LEN_SIZE};
use crate::source::Source;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};
use std::io::Write;

impl<T: Dump> Dump for [T] {
    fn dump<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, EncodeError> {
        let mut c = dump_len(self.len(), w)?;
        for item in self {
            c += item.dump(w)?;
        }
        Ok(c)
    }
}

impl<T: Dump> Dump for Vec<T> {
    #[inline]
    fn dump<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, EncodeError> {
        self.as_slice().dump(w)
    }
}

impl<T: Load + Default> Load for Vec<T> {
    const MIN_WIRE_SIZE: usize = LEN_SIZE;

    fn load<S: Source>(&mut self, src: &mut S) -> Result<(), DecodeError> {
        let len = load_len(src, T::MIN_WIRE_SIZE)?;
        let mut out = Vec::with_capacity(capacity::<T, _>(src, len, T::MIN_WIRE_SIZE));
        for _ in 0..len {
            out.push(T::unpack(src)?);
        }
        *self = out;
        Ok(())
    }
}

impl<T: Dump> Dump for VecDeque<T> {
    fn dump<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, EncodeError> {
        let mut c = dump_len(self.len(), w)?;
        for item in self {
            c += item.dump(w)?;
        }
        Ok(c)
    }
}

impl<T: Load + Default> Load for VecDeque<T> {
    const MIN_WIRE_SIZE: usize = LEN_SIZE;

    fn load<S: Source>(&mut self, src: &mut S) -> Result<(), DecodeError> {
        let len = load_len(src, T::MIN_WIRE_SIZE)?;
        let mut out = VecDeque::with_capacity(capacity::<T, _>(src, len, T::MIN_WIRE_SIZE));
        for _ in 0..len {
            out.push_back(T::unpack(src)?);
        }
        *self = out;
        Ok(())
    }
}

impl<T: Dump, H> Dump for HashSet<T, H> {
    fn dump<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, EncodeError> {
        let mut c = dump_len(self.len(), w)?;
        for item in self {
            c += item.dump(w)?;
        }
        Ok(c)
    }
}

impl<T, H> Load for HashSet<T, H>
where
    T: Load + Default + Eq + Hash,
    H: BuildHasher + Default,
{
    const MIN_WIRE_SIZE: usize = LEN_SIZE;

    fn load<S: Source>(&mut self, src: &mut S) -> Result<(), DecodeError> {
        let len = load_len(src, T::MIN_WIRE_SIZE)?;
        let mut out = HashSet::with_capacity_and_hasher(capacity::<T, _>(src, len, T::MIN_WIRE_SIZE), H::default());
        for _ in 0..len {
            out.insert(T::unpack(src)?);
        }
        *self = out;
        Ok(())
    }
}

impl<T: Dump> Dump for BTreeSet<T> {
    fn dump<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, EncodeError> {
        let mut c = dump_len(self.len(), w)?;
        for item in self {
            c += item.dump(w)?;
        }
        Ok(c)
    }
}

impl<T: Load + Default + Ord> Load for BTreeSet<T> {
    const MIN_WIRE_SIZE: usize = LEN_SIZE;

    fn load<S: Source>(&mut self, src: &mut S) -> Result<(), DecodeError> {
        let len = load_len(src, T::MIN_WIRE_SIZE)?;
        let mut out = BTreeSet::new();
        for _ in 0..len {
            out.insert(T::unpack(src)?);
        }
        *self = out;
        Ok(())
    }
}

impl<K: Dump, V: Dump, H> Dump for HashMap<K, V, H> {
    fn dump<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, EncodeError> {
        let mut c = dump_len(self.len(), w)?;
        for (k, v) in self {
            c += k.dump(w)?;
            c += v.dump(w)?;
        }
        Ok(c)
    }
}

impl<K, V, H> Load for HashMap<K, V, H>
where
    K: Load + Default + Eq + Hash,
    V: Load + Default,
    H: BuildHasher + Default,
{
    const MIN_WIRE_SIZE: usize = LEN_SIZE;

    fn load<S: Source>(&mut self, src: &mut S) -> Result<(), DecodeError> {
        let entry = K::MIN_WIRE_SIZE + V::MIN_WIRE_SIZE;
        let len = load_len(src, entry)?;
        let mut out = HashMap::with_capacity_and_hasher(capacity::<(K, V), _>(src, len, entry), H::default());
        for _ in 0..len {
            let k = K::unpack(src)?;
            let v = V::unpack(src)?;
            out.insert(k, v);
        }
        *self = out;
        Ok(())
    }
}

impl<K: Dump, V: Dump> Dump for BTreeMap<K, V> {
    fn dump<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, EncodeError> {
        let mut c = dump_len(self.len(), w)?;
        for (k, v) in self {
            c += k.dump(w)?;
            c += v.dump(w)?;
        }
        Ok(c)
    }
}

impl<K, V> Load for BTreeMap<K, V>
where
    K: Load + Default + Ord,
    V: Load + Default,
{
    const MIN_WIRE_SIZE: usize = LEN_SIZE;

    fn load<S: Source>(&mut self, src: &mut S) -> Result<(), DecodeError> {
        let len = load_len(src, K::MIN_WIRE_SIZE + V::MIN_WIRE_SIZE)?;
        let mut out = BTreeMap::new();
        for _ in 0..len {
            let k = K::unpack(src)?;
            let v = V::unpack(src)?;
            out.insert(k, v);
        }
        *self = out;
        Ok(())
    }
}

/// One tag byte, `0` for `None` and `1` for `Some`, followed by the value if present.
impl<T: Dump> Dump for Option<T> {
    fn dump<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, EncodeError> {
        match self {
            None => 0u8.dump(w),
            Some(v) => Ok(1u8.dump(w)? + v.dump(w)?),
        }
    }
}

impl<T: Load + Default> Load for Option<T> {
    const MIN_WIRE_SIZE: usize = 1;

    fn load<S: Source>(&mut self, src: &mut S) -> Result<(), DecodeError> {
        match u8::unpack(src)? {
            0 => *self = None,
            1 => *self = Some(T::unpack(src)?),
            tag => return Err(DecodeError::Tag(tag)),
        }
        Ok(())
    }
}

impl<T: Dump + ?Sized> Dump for Box<T> {
    #[inline]
    fn dump<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, EncodeError> {
        (**self).dump(w)
    }
}

impl<T: Load> Load for Box<T> {
    const MIN_WIRE_SIZE: usize = T::MIN_WIRE_SIZE;

    #[inline]
    fn load<S: Source>(&mut self, src: &mut S) -> Result<(), DecodeError> {
        (**self).load(src)
    }
}

impl<T: Dump + ?Sized> Dump for &T {
    #[inline]
    fn dump<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, EncodeError> {
        (**self).dump(w)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DecodeError;
    use crate::pack::{Dump, Load};
    use crate::source::{ReaderSource, SliceSource};
    use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

    fn pack<T: Dump + ?Sized>(value: &T) -> Vec<u8> {
        let mut buf = Vec::new();
        let written = value.dump(&mut buf).unwrap();
        assert_eq!(written, buf.len());
        buf
    }

    #[test]
    fn vector() {
        let nums = vec![10, 30, 50];
        let buf = pack(&nums);
        assert_eq!(buf.len(), 4 + 3 * 4);
        let mut unpacked: Vec<i32> = vec![1, 2, 3, 4, 5];
        unpacked.load(&mut SliceSource::new(&buf)).unwrap();
        assert_eq!(unpacked, [10, 30, 50]);
    }

    #[test]
    fn nested_vectors() {
        let grid = vec![vec![String::from("a")], vec![], vec![String::from("b"), String::from("c")]];
        let buf = pack(&grid);
        assert_eq!(Vec::<Vec<String>>::unpack(&mut SliceSource::new(&buf)).unwrap(), grid);
    }

    #[test]
    fn deque_matches_vec_layout() {
        let deque: VecDeque<u16> = [7, 8, 9].into_iter().collect();
        let buf = pack(&deque);
        assert_eq!(buf, pack(&vec![7u16, 8, 9]));
        assert_eq!(VecDeque::<u16>::unpack(&mut SliceSource::new(&buf)).unwrap(), deque);
    }

    #[test]
    fn slices_and_refs() {
        let nums = [1u8, 2, 3];
        assert_eq!(pack(&nums[..]), [3, 0, 0, 0, 1, 2, 3]);
        assert_eq!(pack(&&nums[..]), pack(&nums[..]));
    }

    #[test]
    fn ordered_map() {
        let mut m1 = BTreeMap::new();
        m1.insert(String::from("hello"), 42);
        m1.insert(String::from("world"), 39);
        let buf = pack(&m1);
        let m2 = BTreeMap::<String, i32>::unpack(&mut SliceSource::new(&buf)).unwrap();
        assert_eq!(m2["hello"], 42);
        assert_eq!(m2["world"], 39);
    }

    #[test]
    fn hash_map() {
        let mut m1 = HashMap::new();
        m1.insert(String::from("hello"), 42);
        m1.insert(String::from("world"), 39);
        let buf = pack(&m1);
        let mut m2: HashMap<String, i32> = HashMap::new();
        m2.insert(String::from("stale"), 0);
        m2.load(&mut SliceSource::new(&buf)).unwrap();
        assert_eq!(m2.len(), 2);
        assert_eq!(m2["hello"], 42);
        assert_eq!(m2["world"], 39);
    }

    #[test]
    fn map_layout_is_key_then_value() {
        let mut m = BTreeMap::new();
        m.insert(1u8, 2u16);
        assert_eq!(pack(&m), [1, 0, 0, 0, 1, 2, 0]);
    }

    #[test]
    fn ordered_set() {
        let s1: BTreeSet<i32> = [10, 20, 50].into_iter().collect();
        let buf = pack(&s1);
        let s2 = BTreeSet::<i32>::unpack(&mut SliceSource::new(&buf)).unwrap();
        assert!(s2.contains(&10));
        assert!(s2.contains(&20));
        assert!(s2.contains(&50));
        assert!(!s2.contains(&100));
    }

    #[test]
    fn hash_set() {
        let s1: HashSet<i32> = [10, 20, 50].into_iter().collect();
        let buf = pack(&s1);
        let s2 = HashSet::<i32>::unpack(&mut SliceSource::new(&buf)).unwrap();
        assert_eq!(s1, s2);
        assert!(!s2.contains(&100));
    }

    #[test]
    fn options_and_boxes() {
        let values = vec![Some(Box::new(3u32)), None, Some(Box::new(5))];
        let buf = pack(&values);
        assert_eq!(buf.len(), 4 + (1 + 4) + 1 + (1 + 4));
        assert_eq!(Vec::<Option<Box<u32>>>::unpack(&mut SliceSource::new(&buf)).unwrap(), values);
        assert!(matches!(Option::<u8>::unpack(&mut SliceSource::new(&[7u8])), Err(DecodeError::Tag(7))));
    }

    #[test]
    fn bogus_count_is_rejected_before_allocating() {
        // claims four billion u64 but carries a single one
        let mut buf = vec![0xff, 0xff, 0xff, 0xff];
        buf.extend_from_slice(&1u64.to_le_bytes());
        let err = Vec::<u64>::unpack(&mut SliceSource::new(&buf)).unwrap_err();
        assert!(matches!(err, DecodeError::Underflow { remaining: 8, .. }));
        let err = HashMap::<u64, u64>::unpack(&mut SliceSource::new(&buf)).unwrap_err();
        assert!(err.is_underflow());
    }

    #[test]
    fn bogus_count_from_reader() {
        let mut buf = vec![0xff, 0xff, 0xff, 0xff];
        buf.extend_from_slice(&1u64.to_le_bytes());
        let err = Vec::<u64>::unpack(&mut ReaderSource::new(buf.as_slice())).unwrap_err();
        assert!(matches!(err, DecodeError::Underflow { needed: 8, remaining: 0 }));
    }

    #[test]
    fn failed_load_leaves_destination_alone() {
        let buf = [2u8, 0, 0, 0, 1, 0, 0, 0];
        let mut dst = vec![9u32];
        assert!(dst.load(&mut SliceSource::new(&buf)).is_err());
        assert_eq!(dst, [9]);
    }
}
