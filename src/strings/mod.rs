/// Inverte uma string com a técnica de dois ponteiros sobre um buffer de chars.
///
/// A entrada é copiada para um buffer mutável de `char` (um scalar Unicode por
/// posição). Dois índices partem das extremidades e trocam os elementos até se
/// cruzarem, ou seja, exatamente `len / 2` trocas. A inversão é posicional:
/// marcas combinantes e sequências multi-unidade são invertidas uma a uma, sem
/// tratamento de grafemas.
pub fn reverse_str(input: &str) -> String
{
    let mut chars: Vec<char> = input.chars().collect();

    if chars.len() < 2
    {
        return input.to_string();
    }

    let mut left = 0;
    let mut right = chars.len() - 1;

    while left < right
    {
        chars.swap(left, right);
        left += 1;
        right -= 1;
    }

    chars.into_iter().collect()
}
